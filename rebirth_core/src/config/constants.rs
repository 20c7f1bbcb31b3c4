//! Rebirth formula constants

use super::ConfigError;
use crate::types::STAGE_COUNT;
use serde::{Deserialize, Serialize};

/// Tunable rebirth constants
///
/// Every field has a default matching the live game, so a constants file
/// only needs to list what it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RebirthConstants {
    #[serde(default)]
    pub stages: StageConstants,
    #[serde(default)]
    pub points: PointConstants,
    #[serde(default)]
    pub coefficient: CoefficientConstants,
    #[serde(default)]
    pub convergence: ConvergenceConstants,
}

impl RebirthConstants {
    /// Load constants from a TOML file and validate them
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let constants: RebirthConstants = super::load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Parse constants from a TOML string and validate them
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let constants: RebirthConstants = super::parse_toml(content)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Reject constants that would make the formulas divide by zero or never iterate
    pub fn validate(&self) -> Result<(), ConfigError> {
        let divisors = [
            ("coefficient.stat_divisor", self.coefficient.stat_divisor),
            ("coefficient.quest_divisor", self.coefficient.quest_divisor),
            ("coefficient.level_divisor", self.coefficient.level_divisor),
        ];
        for (name, value) in divisors {
            if value == 0 {
                return Err(ConfigError::ValidationError(format!("{} must not be 0", name)));
            }
        }

        let tolerance = self.convergence.tolerance;
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "convergence.tolerance must be a positive number, got {}",
                tolerance
            )));
        }

        if self.convergence.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "convergence.max_iterations must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Quest points granted in stage `index`
    pub fn quest_points(&self, index: usize) -> i64 {
        self.stages.quest_points.get(index).copied().unwrap_or(0)
    }

    /// Fixed bonus added to stage `index`'s rebirth value
    pub fn bonus(&self, index: usize) -> i64 {
        self.stages.bonuses.get(index).copied().unwrap_or(0)
    }

    /// Final stat baseline used before any iteration has run
    pub fn initial_baseline(&self, index: usize) -> i64 {
        if index == 0 {
            self.stages.base_stat_total
        } else {
            self.stages.carried_stat_base
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConstants {
    /// Stat total a first-stage character works against
    #[serde(default = "default_base_stat_total")]
    pub base_stat_total: i64,
    /// Baseline for later stages before the previous stage's rebirth value is added
    #[serde(default = "default_carried_stat_base")]
    pub carried_stat_base: i64,
    /// Quest points earned per stage
    #[serde(default = "default_quest_points")]
    pub quest_points: [i64; STAGE_COUNT],
    /// Fixed bonus per stage
    #[serde(default = "default_bonuses")]
    pub bonuses: [i64; STAGE_COUNT],
}

impl Default for StageConstants {
    fn default() -> Self {
        StageConstants {
            base_stat_total: 437,
            carried_stat_base: 417,
            quest_points: [20; STAGE_COUNT],
            bonuses: [10, 20, 30, 40, 50],
        }
    }
}

fn default_base_stat_total() -> i64 {
    437
}
fn default_carried_stat_base() -> i64 {
    417
}
fn default_quest_points() -> [i64; STAGE_COUNT] {
    [20; STAGE_COUNT]
}
fn default_bonuses() -> [i64; STAGE_COUNT] {
    [10, 20, 30, 40, 50]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointConstants {
    /// Points a fresh character starts with
    #[serde(default = "default_initial_points")]
    pub initial_points: i64,
    /// Points gained per level after the first
    #[serde(default = "default_points_per_level")]
    pub points_per_level: i64,
    /// Applied rebirth assumed per earlier stage when no results exist yet
    #[serde(default = "default_fallback_applied_estimate")]
    pub fallback_applied_estimate: i64,
}

impl Default for PointConstants {
    fn default() -> Self {
        PointConstants {
            initial_points: 20,
            points_per_level: 3,
            fallback_applied_estimate: 10,
        }
    }
}

fn default_initial_points() -> i64 {
    20
}
fn default_points_per_level() -> i64 {
    3
}
fn default_fallback_applied_estimate() -> i64 {
    10
}

/// Rebirth coefficient formula:
/// `trunc(total_real / stat_divisor + quests / quest_divisor + (levels - level_allowance * stages) / level_divisor)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientConstants {
    #[serde(default = "default_stat_divisor")]
    pub stat_divisor: i64,
    #[serde(default = "default_quest_divisor")]
    pub quest_divisor: i64,
    #[serde(default = "default_level_divisor")]
    pub level_divisor: i64,
    /// Levels per completed stage that earn nothing
    #[serde(default = "default_level_allowance")]
    pub level_allowance: i64,
}

impl Default for CoefficientConstants {
    fn default() -> Self {
        CoefficientConstants {
            stat_divisor: 12,
            quest_divisor: 4,
            level_divisor: 4,
            level_allowance: 85,
        }
    }
}

fn default_stat_divisor() -> i64 {
    12
}
fn default_quest_divisor() -> i64 {
    4
}
fn default_level_divisor() -> i64 {
    4
}
fn default_level_allowance() -> i64 {
    85
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceConstants {
    /// Largest baseline/agi change still counted as converged
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

impl Default for ConvergenceConstants {
    fn default() -> Self {
        ConvergenceConstants {
            tolerance: 0.001,
            max_iterations: 100,
        }
    }
}

fn default_tolerance() -> f64 {
    0.001
}
fn default_max_iterations() -> u32 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = RebirthConstants::default();
        assert_eq!(constants.stages.base_stat_total, 437);
        assert_eq!(constants.stages.carried_stat_base, 417);
        assert_eq!(constants.bonus(4), 50);
        assert_eq!(constants.quest_points(2), 20);
        assert!((constants.convergence.tolerance - 0.001).abs() < f64::EPSILON);
        assert_eq!(constants.convergence.max_iterations, 100);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_parse_constants() {
        let toml = r#"
[stages]
base_stat_total = 437
carried_stat_base = 417
quest_points = [20, 20, 20, 20, 20]
bonuses = [10, 20, 30, 40, 50]

[points]
initial_points = 20
points_per_level = 3

[coefficient]
stat_divisor = 12
quest_divisor = 4
level_divisor = 4
level_allowance = 85

[convergence]
tolerance = 0.001
max_iterations = 100
"#;

        let constants = RebirthConstants::parse(toml).unwrap();
        assert_eq!(constants, RebirthConstants::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let toml = r#"
[convergence]
max_iterations = 7
"#;

        let constants = RebirthConstants::parse(toml).unwrap();
        assert_eq!(constants.convergence.max_iterations, 7);
        assert!((constants.convergence.tolerance - 0.001).abs() < f64::EPSILON);
        assert_eq!(constants.stages, StageConstants::default());
        assert_eq!(constants.points.fallback_applied_estimate, 10);
    }

    #[test]
    fn test_bonus_array_must_have_five_entries() {
        let toml = r#"
[stages]
bonuses = [10, 20, 30]
"#;

        assert!(matches!(
            RebirthConstants::parse(toml),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let toml = r#"
[coefficient]
stat_divisor = 0
"#;

        let err = RebirthConstants::parse(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("stat_divisor"));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let mut constants = RebirthConstants::default();
        constants.convergence.max_iterations = 0;
        assert!(constants.validate().is_err());

        constants.convergence.max_iterations = 1;
        constants.convergence.tolerance = 0.0;
        assert!(constants.validate().is_err());
    }

    #[test]
    fn test_initial_baseline() {
        let constants = RebirthConstants::default();
        assert_eq!(constants.initial_baseline(0), 437);
        assert_eq!(constants.initial_baseline(3), 417);
    }
}
