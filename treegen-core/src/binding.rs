//! JSON boundary for host environments.
//!
//! A host hands over a loosely typed config object, for example
//! `{ "baseLength": 1, "widthHeightRatio": "0.3", "maxEnergy": 10,
//! "branchEnergyRatio": 0.5, "seed": 7 }`. This module coerces it into a
//! [`GrowthConfig`], runs generation and converts the result back into
//! plain JSON.

use serde_json::{Map, Value, json};

use crate::{
    config::GrowthConfig,
    error::{ConfigError, Result},
    generate::GeneratedTree,
    gfx::GfxObject,
};

/// Seed used when the host object does not carry one.
pub const DEFAULT_SEED: u64 = 1;

/// Reads a [`GrowthConfig`] and seed out of a host object.
///
/// Each growth field must be present and be a number or a numeric string.
/// `seed` is optional and defaults to [`DEFAULT_SEED`].
pub fn config_from_value(value: &Value) -> Result<(GrowthConfig, u64)> {
    let obj = value.as_object().ok_or_else(|| ConfigError::InvalidField {
        field: "config",
        reason: "expected a JSON object".to_string(),
    })?;

    let config = GrowthConfig {
        base_length: number_field(obj, "baseLength")?,
        width_height_ratio: number_field(obj, "widthHeightRatio")?,
        max_energy: number_field(obj, "maxEnergy")?,
        branch_energy_ratio: number_field(obj, "branchEnergyRatio")?,
    };
    let seed = seed_field(obj)?;
    Ok((config, seed))
}

/// Generates a tree from a host object and returns
/// `{seed, nodeCount, tree, mesh, diagnostics}`.
pub fn generate_value(value: &Value) -> Result<Value> {
    let (config, seed) = config_from_value(value)?;
    let tree = GeneratedTree::generate(seed, &config)?;
    Ok(to_value(&tree))
}

/// Converts a generated tree into the host-side representation.
pub fn to_value(tree: &GeneratedTree) -> Value {
    json!({
        "seed": tree.seed(),
        "nodeCount": tree.node_count(),
        "tree": tree.to_json(),
        "mesh": tree.mesh().to_json(),
        "diagnostics": tree.diagnostics(),
    })
}

fn number_field(obj: &Map<String, Value>, field: &'static str) -> std::result::Result<f32, ConfigError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ConfigError::MissingField(field)),
        Some(Value::Number(n)) => n.as_f64().map(|v| v as f32).ok_or_else(|| ConfigError::InvalidField {
            field,
            reason: format!("{n} is not representable as a float"),
        }),
        Some(Value::String(s)) => s.trim().parse::<f32>().map_err(|e| ConfigError::InvalidField {
            field,
            reason: format!("{s:?}: {e}"),
        }),
        Some(other) => Err(ConfigError::InvalidField {
            field,
            reason: format!("expected a number, got {other}"),
        }),
    }
}

fn seed_field(obj: &Map<String, Value>) -> std::result::Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidField {
        field: "seed",
        reason,
    };
    match obj.get("seed") {
        None | Some(Value::Null) => Ok(DEFAULT_SEED),
        Some(Value::Number(n)) => n
            .as_u64()
            .ok_or_else(|| invalid(format!("{n} is not a non-negative integer"))),
        Some(Value::String(s)) => s.trim().parse::<u64>().map_err(|e| invalid(format!("{s:?}: {e}"))),
        Some(other) => Err(invalid(format!("expected an integer, got {other}"))),
    }
}
