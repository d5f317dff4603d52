//! Flat triangle mesh builder.
//!
//! A [`Mesh`] is an append-only list of vertex positions plus a list of
//! [`Surface`] triangles indexing into it. Boxes are appended with
//! [`Mesh::add_cube`]: eight fresh vertices and twelve triangles per call,
//! never shared with earlier boxes.

use glam::Vec3;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::gfx::{Attachments, Diagnostic, GfxObject};
use crate::math::placement_matrix;
use crate::types::VertexIndex;

/// One triangle, as three indices into the owning mesh's vertex list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Surface(pub [VertexIndex; 3]);

/// Corners of a unit box centered on the local origin.
///
/// Upper four (`+y`) first, then the lower four in the same x/z order, so
/// corner `i + 4` sits directly below corner `i`.
const UNIT_BOX_CORNERS: [Vec3; 8] = [
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(-0.5, 0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(-0.5, -0.5, 0.5),
];

/// Box faces as local corner offsets, counter-clockwise seen from outside
/// (right-handed). Order: top, front, back, left, right, bottom.
const UNIT_BOX_FACES: [[VertexIndex; 4]; 6] = [
    [0, 1, 2, 3], // top    (+y)
    [0, 3, 7, 4], // front  (+z)
    [1, 5, 6, 2], // back   (-z)
    [2, 6, 7, 3], // left   (-x)
    [0, 4, 5, 1], // right  (+x)
    [5, 4, 7, 6], // bottom (-y)
];

#[derive(Debug, Default)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    surfaces: Vec<Surface>,
    attachments: Attachments,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Appends a vertex and returns its index.
    ///
    /// ### Errors
    /// [`Error::VertexIndexOverflow`] once the index no longer fits a
    /// [`VertexIndex`].
    pub fn add_vertex(&mut self, pos: Vec3) -> Result<VertexIndex> {
        let index = reserve_indices(self.vertices.len(), 1)?;
        self.vertices.push(pos);
        Ok(index)
    }

    /// Appends the triangle `(i, j, k)`.
    ///
    /// Indices are not checked here; see [`Mesh::validate`].
    #[inline]
    pub fn add_triangle(&mut self, i: VertexIndex, j: VertexIndex, k: VertexIndex) {
        self.surfaces.push(Surface([i, j, k]));
    }

    /// Appends a quad as the two triangles `(a, b, c)` and `(c, d, a)`.
    #[inline]
    pub fn add_quad(&mut self, a: VertexIndex, b: VertexIndex, c: VertexIndex, d: VertexIndex) {
        self.add_triangle(a, b, c);
        self.add_triangle(c, d, a);
    }

    /// Appends an axis-aligned box centered on `origin` with edge lengths
    /// `scale`.
    ///
    /// The up vector is accepted for orientation but not applied: the box
    /// always stays axis-aligned.
    ///
    /// ### Returns
    /// Index of the first of the eight vertices appended by this call.
    ///
    /// ### Errors
    /// [`Error::VertexIndexOverflow`] if the eight new indices would not all
    /// fit a [`VertexIndex`]; the mesh is left unchanged.
    pub fn add_cube(&mut self, origin: Vec3, _up: Vec3, scale: Vec3) -> Result<VertexIndex> {
        let mat = placement_matrix(origin, scale);

        let base = reserve_indices(self.vertices.len(), UNIT_BOX_CORNERS.len())?;
        self.vertices
            .extend(UNIT_BOX_CORNERS.iter().map(|&c| mat.transform_point3(c)));

        for [a, b, c, d] in UNIT_BOX_FACES {
            self.add_quad(base + a, base + b, base + c, base + d);
        }
        Ok(base)
    }

    /// Checks that every surface indexes an existing vertex.
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertices.len();
        for (surface, tri) in self.surfaces.iter().enumerate() {
            if let Some(&index) = tri.0.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(Error::SurfaceOutOfRange {
                    surface,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}

/// Index of the first of `extra` vertices appended to a mesh that already
/// holds `len`, provided the last of them is still addressable.
fn reserve_indices(len: usize, extra: usize) -> Result<VertexIndex> {
    let overflow = || Error::VertexIndexOverflow { vertex_count: len };
    let last = len.checked_add(extra.saturating_sub(1)).ok_or_else(overflow)?;
    VertexIndex::try_from(last).map_err(|_| overflow())?;
    VertexIndex::try_from(len).map_err(|_| overflow())
}

impl Serialize for Mesh {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        struct Positions<'a>(&'a [Vec3]);

        impl Serialize for Positions<'_> {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.collect_seq(self.0.iter().map(|v| v.to_array()))
            }
        }

        let mut s = serializer.serialize_struct("Mesh", 2)?;
        s.serialize_field("vertices", &Positions(&self.vertices))?;
        s.serialize_field("triangles", &self.surfaces)?;
        s.end()
    }
}

impl GfxObject for Mesh {
    fn to_json(&self) -> Value {
        serde_json::json!(self)
    }

    fn add_child(&mut self, child: Box<dyn GfxObject>) {
        self.attachments.children.push(child);
    }

    fn children(&self) -> &[Box<dyn GfxObject>] {
        &self.attachments.children
    }

    fn diagnostics(&self) -> &[Diagnostic] {
        &self.attachments.diagnostics
    }
}
