//! rebirth_core - Rebirth progression calculator for five-stage characters
//!
//! This library provides:
//! - trunc: Toward-zero quantization used for every fractional rebirth value
//! - evaluate_stage: One-pass formula evaluation for a single rebirth stage
//! - solve: Fixed-point iteration over the five mutually dependent stages
//! - available_points: Stat-point budget for a stage, used to clamp edits

pub mod budget;
pub mod config;
pub mod prelude;
pub mod quantize;
pub mod solver;
pub mod stage;
pub mod types;

// Re-export core types for convenience
pub use budget::{apply_stat_edit, available_points, available_points_with, set_level, stage_budget};
pub use config::{default_presets, ConfigError, Preset, RebirthBuild, RebirthConstants};
pub use quantize::{trunc, trunc_whole};
pub use solver::{solve, solve_build, solve_with, ConvergenceState, Solution};
pub use stage::{evaluate_stage, StageContext, StageResult};
pub use types::{BaseStats, EditableStat, StageInput, StatField, StatSet, STAGE_COUNT};
