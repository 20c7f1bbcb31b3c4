//! Saved build files (per-stage levels and base stats)

use super::ConfigError;
use crate::types::{BaseStats, StageInput, STAGE_COUNT};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A full five-stage build as written in a build file
///
/// ```toml
/// levels = [140, 140, 140, 137, 140]
/// stats = [
///     { con = 100, wis = 17, dex = 0 },
///     # ... one entry per stage
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebirthBuild {
    pub levels: Vec<u32>,
    pub stats: Vec<BaseStats>,
}

impl RebirthBuild {
    /// Build with every stage at `level` and no points spent
    pub fn blank(level: u32) -> Self {
        RebirthBuild {
            levels: vec![level; STAGE_COUNT],
            stats: vec![BaseStats::default(); STAGE_COUNT],
        }
    }

    pub fn from_inputs(inputs: &[StageInput; STAGE_COUNT]) -> Self {
        RebirthBuild {
            levels: inputs.iter().map(|input| input.level).collect(),
            stats: inputs.iter().map(StageInput::base_stats).collect(),
        }
    }

    /// Load a build from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        super::load_toml(path)
    }

    /// Parse a build from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        super::parse_toml(content)
    }

    /// Check stage counts and levels
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.len() != STAGE_COUNT {
            return Err(ConfigError::ValidationError(format!(
                "expected {} levels, found {}",
                STAGE_COUNT,
                self.levels.len()
            )));
        }
        if self.stats.len() != STAGE_COUNT {
            return Err(ConfigError::ValidationError(format!(
                "expected {} stat entries, found {}",
                STAGE_COUNT,
                self.stats.len()
            )));
        }
        if let Some(stage) = self.levels.iter().position(|&level| level == 0) {
            return Err(ConfigError::ValidationError(format!(
                "stage {} has level 0, levels start at 1",
                stage + 1
            )));
        }
        Ok(())
    }

    /// Convert into solver input
    pub fn to_inputs(&self) -> Result<[StageInput; STAGE_COUNT], ConfigError> {
        self.validate()?;
        Ok(std::array::from_fn(|i| {
            StageInput::from_base(self.levels[i], self.stats[i])
        }))
    }
}
