//! Procedural tree growth and box-mesh synthesis.
//!
//! Main components:
//! - [`math`] — vector helpers and the box placement matrix.
//! - [`gfx`] — the geometric-object capability and diagnostics.
//! - [`mesh`] — triangle mesh builder (triangles, quads, boxes).
//! - [`tree`] — growth nodes stored in an index arena.
//! - [`phases`] — growth phase and mesh phase.
//! - [`generate`] — end-to-end generation of one tree.
//! - [`config`] — growth parameters and their validation.
//! - [`binding`] — JSON boundary for host environments.
//! - [`types`] — shared type aliases and IDs.

pub mod binding;
pub mod config;
pub mod error;
pub mod generate;
pub mod gfx;
pub mod math;
pub mod mesh;
pub mod phases;
pub mod tree;
pub mod types;

pub use config::GrowthConfig;
pub use error::{ConfigError, Error, Result};
pub use generate::GeneratedTree;
pub use gfx::{Diagnostic, GfxObject};
pub use mesh::{Mesh, Surface};
pub use tree::{GrowthNode, NodeKind, Tree};
