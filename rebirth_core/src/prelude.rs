//! Prelude module for convenient imports
//!
//! ```rust
//! use rebirth_core::prelude::*;
//! ```

// Core types
pub use crate::types::{BaseStats, EditableStat, StageInput, StatField, StatSet, STAGE_COUNT};

// Engine
pub use crate::solver::{solve, solve_build, solve_with, Solution};
pub use crate::stage::{evaluate_stage, StageContext, StageResult};

// Budget
pub use crate::budget::{apply_stat_edit, available_points, available_points_with};

// Config
pub use crate::config::{default_presets, Preset, RebirthBuild, RebirthConstants};
