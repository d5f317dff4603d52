use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::gfx::Diagnostic;

/// Largest accepted `maxEnergy`.
///
/// Tree depth follows energy, and serialization and [`crate::Tree::outline`]
/// recurse once per level, so this keeps both well inside a default thread
/// stack. It also keeps `energy - 1.0` exact in `f32`.
pub const MAX_ENERGY: f32 = 128.0;

/// Largest number of nodes a single config may grow.
pub const MAX_NODES: usize = 1 << 20;

/// Growth parameters shared by every node of one generated tree.
///
/// The field names serialize in camelCase so host-side objects such as
/// `{ "baseLength": 1.0, "maxEnergy": 10.0, ... }` deserialize directly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthConfig {
    /// Length of a node grown with full energy, per `log10(energy)`.
    pub base_length: f32,
    /// Width-to-length ratio of every node (e.g. `0.3`).
    pub width_height_ratio: f32,
    /// Energy given to the root node.
    pub max_energy: f32,
    /// Fraction of the trunk's energy handed to the side branch.
    pub branch_energy_ratio: f32,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            base_length: 1.0,
            width_height_ratio: 0.3,
            max_energy: 10.0,
            branch_energy_ratio: 0.5,
        }
    }
}

impl GrowthConfig {
    /// Checks the config before any node is grown.
    ///
    /// Returns the non-fatal notices worth reporting (currently only the
    /// "root will be a leaf" case) or the first fatal [`ConfigError`].
    pub fn validate(&self) -> Result<Vec<Diagnostic>, ConfigError> {
        let fields = [
            ("baseLength", self.base_length),
            ("widthHeightRatio", self.width_height_ratio),
            ("maxEnergy", self.max_energy),
            ("branchEnergyRatio", self.branch_energy_ratio),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }

        for (field, value) in [
            ("baseLength", self.base_length),
            ("widthHeightRatio", self.width_height_ratio),
            ("branchEnergyRatio", self.branch_energy_ratio),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.max_energy > MAX_ENERGY {
            return Err(ConfigError::MaxEnergyTooLarge(self.max_energy));
        }
        if self.base_length == 0.0 {
            return Err(ConfigError::NonPositiveBaseLength(self.base_length));
        }
        if self.branch_energy_ratio == 0.0 || self.branch_energy_ratio > 1.0 {
            return Err(ConfigError::BranchRatioOutOfRange(self.branch_energy_ratio));
        }
        if self.planned_node_count(MAX_NODES).is_none() {
            return Err(ConfigError::TooManyNodes { limit: MAX_NODES });
        }

        let mut notices = Vec::new();
        if self.max_energy - 1.0 <= 1.0 {
            notices.push(crate::diagnostic!(
                "maxEnergy {} leaves no energy for children; the root will be a leaf",
                self.max_energy
            ));
        }
        Ok(notices)
    }

    /// Number of nodes growth will create, counted from energies alone.
    ///
    /// Replays the energy split of [`crate::phases::growth_phase`] without
    /// building any geometry. Gives up and returns `None` as soon as the
    /// count passes `limit`.
    pub fn planned_node_count(&self, limit: usize) -> Option<usize> {
        let mut count = 0;
        let mut pending = vec![self.max_energy];

        while let Some(energy) = pending.pop() {
            count += 1;
            if count > limit {
                return None;
            }
            let child_energy = energy - 1.0;
            if child_energy > 1.0 {
                pending.push(child_energy);
                pending.push(child_energy * self.branch_energy_ratio);
            }
        }
        Some(count)
    }

    /// Upper bound on the number of generations below the root.
    pub fn max_depth(&self) -> usize {
        self.max_energy.max(0.0).ceil() as usize
    }
}
