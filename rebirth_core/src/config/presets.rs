//! Built-in and file-based build presets

use super::{ConfigError, RebirthBuild};
use crate::types::BaseStats;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A named build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub levels: Vec<u32>,
    pub stats: Vec<BaseStats>,
}

impl Preset {
    /// The preset's levels and stats as a build
    pub fn build(&self) -> RebirthBuild {
        RebirthBuild {
            levels: self.levels.clone(),
            stats: self.stats.clone(),
        }
    }
}

/// Container for preset configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetsConfig {
    #[serde(rename = "presets")]
    pub presets: Vec<Preset>,
}

/// Load presets from a TOML file
pub fn load_preset_configs(path: &Path) -> Result<Vec<Preset>, ConfigError> {
    let config: PresetsConfig = super::load_toml(path)?;
    validate_presets(&config.presets)?;
    Ok(config.presets)
}

/// Load presets from a TOML string
pub fn parse_preset_configs(content: &str) -> Result<Vec<Preset>, ConfigError> {
    let config: PresetsConfig = super::parse_toml(content)?;
    validate_presets(&config.presets)?;
    Ok(config.presets)
}

fn validate_presets(presets: &[Preset]) -> Result<(), ConfigError> {
    for preset in presets {
        preset.build().validate().map_err(|e| {
            ConfigError::ValidationError(format!("preset '{}': {}", preset.id, e))
        })?;
    }
    Ok(())
}

/// Get the built-in presets
pub fn default_presets() -> Vec<Preset> {
    let toml = include_str!("../../config/presets.toml");
    parse_preset_configs(toml).unwrap_or_else(|e| {
        tracing::warn!("built-in presets failed to load: {}", e);
        let blank = RebirthBuild::blank(140);
        vec![Preset {
            id: "blank".to_string(),
            name: "Blank".to_string(),
            description: None,
            levels: blank.levels,
            stats: blank.stats,
        }]
    })
}

/// Find a preset by id
pub fn find_preset<'a>(presets: &'a [Preset], id: &str) -> Option<&'a Preset> {
    presets.iter().find(|preset| preset.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StageInput;

    #[test]
    fn test_parse_presets() {
        let toml = r#"
[[presets]]
id = "tiny"
name = "Tiny"
levels = [1, 1, 1, 1, 1]
stats = [
    { con = 20 },
    { wis = 3 },
    {},
    {},
    { dex = 1 },
]
"#;

        let presets = parse_preset_configs(toml).unwrap();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].description, None);
        let inputs = presets[0].build().to_inputs().unwrap();
        assert_eq!(inputs[0], StageInput::new(1, 20, 0, 0));
        assert_eq!(inputs[4], StageInput::new(1, 0, 0, 1));
    }

    #[test]
    fn test_invalid_preset_names_its_id() {
        let toml = r#"
[[presets]]
id = "short"
name = "Short"
levels = [140, 140]
stats = [{}, {}]
"#;

        let err = parse_preset_configs(toml).unwrap_err();
        assert!(err.to_string().contains("preset 'short'"));
    }

    #[test]
    fn test_default_presets_loads_all() {
        let presets = default_presets();

        assert_eq!(presets.len(), 5, "Expected 5 presets from config");

        let expected = ["blank", "constitution", "transition", "wisdom", "agility"];
        for id in expected {
            assert!(find_preset(&presets, id).is_some(), "Missing preset: {}", id);
        }
    }

    #[test]
    fn test_transition_preset_values() {
        let presets = default_presets();
        let transition = find_preset(&presets, "transition").unwrap();
        let inputs = transition.build().to_inputs().unwrap();
        assert_eq!(inputs[3], StageInput::new(137, 89, 385, 2));
        assert_eq!(inputs[4], StageInput::new(140, 21, 539, 2));
    }
}
