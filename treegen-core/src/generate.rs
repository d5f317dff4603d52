//! End-to-end generation of one tree.
//!
//! [`GeneratedTree::generate`] validates the config, grows the node tree
//! from a seeded RNG and synthesizes its mesh. The result is immutable:
//! callers only get shared access to the nodes and the mesh.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde_json::Value;

use crate::{
    config::GrowthConfig,
    error::Result,
    gfx::{Attachments, Diagnostic, GfxObject},
    mesh::Mesh,
    phases,
    tree::{GrowthNode, ROOT, Tree},
};

#[derive(Debug)]
pub struct GeneratedTree {
    seed: u64,
    config: GrowthConfig,
    tree: Tree,
    mesh: Mesh,
    attachments: Attachments,
}

impl GeneratedTree {
    /// Generates a tree whose branch perturbations come from `seed`.
    ///
    /// The same seed and config always produce the same geometry.
    pub fn generate(seed: u64, config: &GrowthConfig) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::generate_with_rng(seed, config, &mut rng)
    }

    /// Like [`GeneratedTree::generate`], drawing from a caller-supplied RNG.
    ///
    /// `seed` is only recorded on the result.
    ///
    /// ### Errors
    /// - [`crate::Error::Config`] if `config` fails validation; no node is
    ///   created in that case.
    /// - [`crate::Error::ZeroLengthVector`] if a branch direction degenerates.
    /// - [`crate::Error::VertexIndexOverflow`] if the mesh outgrows its
    ///   index type.
    pub fn generate_with_rng(seed: u64, config: &GrowthConfig, rng: &mut impl Rng) -> Result<Self> {
        let notices = config.validate()?;

        let mut tree = Tree::new(config);
        phases::growth_phase(&mut tree, config, rng)?;

        let mesh = phases::mesh_phase(&tree)?;
        mesh.validate()?;

        let mut attachments = Attachments::default();
        for notice in notices {
            attachments.notice(notice);
        }

        log::info!(
            "generated tree (seed {seed}): {} nodes, {} vertices, {} triangles",
            tree.node_count(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        Ok(Self {
            seed,
            config: *config,
            tree,
            mesh,
            attachments,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GrowthConfig {
        &self.config
    }

    pub fn root(&self) -> &GrowthNode {
        self.tree.root()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// One plus the number of descendants of the root.
    pub fn node_count(&self) -> usize {
        self.tree.node_count()
    }
}

impl GfxObject for GeneratedTree {
    /// The node tree as nested `{id, origin, length, width, children}`
    /// records, root first.
    fn to_json(&self) -> Value {
        serde_json::json!(self.tree.view(ROOT))
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
