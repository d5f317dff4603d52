//! Vector and transform helpers on top of `glam`.
//!
//! `glam::Vec3` already provides the vector algebra the growth engine needs
//! (`+=`, scalar `*`, `-`, `cross`, `dot`, `length`, `length_squared`,
//! `normalize`). This module adds the pieces specific to tree generation:
//! the fixed diagnostic epsilon, fallible normalization, the unit-cube
//! random draw used to perturb branches, and the box placement matrix.

use glam::{Mat4, Vec3};
use rand::Rng;

use crate::error::{Error, Result};

/// Absolute tolerance for diagnostic comparisons.
pub const EPSILON: f32 = 1e-4;

/// Direction of the root node and the trunk's reference direction.
pub const UP: Vec3 = Vec3::Y;

/// `true` when `a` and `b` differ by less than [`EPSILON`].
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// `true` when `v` has unit length within [`EPSILON`].
#[inline]
pub fn is_unit(v: Vec3) -> bool {
    approx_eq(v.length_squared(), 1.0)
}

/// Normalizes `v`, failing instead of producing NaNs for a zero vector.
///
/// ### Parameters
/// - `v` - Vector to normalize.
/// - `context` - Short description of the caller, carried by the error.
///
/// ### Returns
/// The unit vector, or [`Error::ZeroLengthVector`].
pub fn try_unit(v: Vec3, context: &'static str) -> Result<Vec3> {
    v.try_normalize().ok_or(Error::ZeroLengthVector { context })
}

/// Draws a vector whose components are independently uniform in `[0, 1)`.
///
/// The result is deliberately not normalized.
pub fn random_vector(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(rng.random(), rng.random(), rng.random())
}

/// Builds the transform placing a unit box: translate to `origin`, then
/// scale each local axis by the matching component of `scale`.
///
/// Applying the result with [`Mat4::transform_point3`] (implicit `w = 1`)
/// maps a local point `p` to `origin + scale * p`.
pub fn placement_matrix(origin: Vec3, scale: Vec3) -> Mat4 {
    Mat4::from_translation(origin) * Mat4::from_scale(scale)
}
