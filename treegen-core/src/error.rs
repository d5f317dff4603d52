//! Error types for tree generation.

use thiserror::Error;

/// Rejected [`crate::config::GrowthConfig`] values.
///
/// Every variant is raised before the first node exists, so a config error
/// never leaves a partially grown tree behind.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be a finite number")]
    NotFinite { field: &'static str },

    #[error("`{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("`baseLength` must be greater than zero (got {0})")]
    NonPositiveBaseLength(f32),

    #[error("`branchEnergyRatio` must be in (0, 1] (got {0})")]
    BranchRatioOutOfRange(f32),

    #[error("`maxEnergy` must be at most {max} (got {0})", max = crate::config::MAX_ENERGY)]
    MaxEnergyTooLarge(f32),

    #[error("config would grow more than {limit} nodes")]
    TooManyNodes { limit: usize },

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot normalize a zero-length vector ({context})")]
    ZeroLengthVector { context: &'static str },

    #[error("surface {surface} references vertex {index} but the mesh has {vertex_count} vertices")]
    SurfaceOutOfRange {
        surface: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("mesh of {vertex_count} vertices has outgrown 32-bit vertex indices")]
    VertexIndexOverflow { vertex_count: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
