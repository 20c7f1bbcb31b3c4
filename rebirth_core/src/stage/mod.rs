//! StageResult - Everything derived for one rebirth stage

mod evaluate;

pub use evaluate::{evaluate_stage, StageContext};

use crate::types::{StageInput, StatSet};
use serde::{Deserialize, Serialize};

/// Derived values for a single stage
///
/// Produced fresh by every evaluation; nothing here is updated in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StageResult {
    /// Level the stage was evaluated at
    pub level: u32,
    /// Quest points granted by this stage
    pub quest: i64,

    // === Stats ===
    /// Stats as shown to the user; `agi` is derived
    pub display_stats: StatSet,
    /// Display stats plus the rounding remainder carried from the previous stage
    pub real_stats: StatSet,
    pub total_display: f64,
    pub total_real: f64,
    /// Budget minus `total_display`; negative when over budget
    pub remaining_points: i64,

    // === Running totals ===
    pub cumulative_quests: i64,
    pub cumulative_levels: i64,

    // === Rebirth ===
    pub rebirth_coefficient: i64,
    /// Coefficient split across the real stats, truncated to whole points
    pub applied_rebirth_integer: StatSet,
    /// Same split truncated to two decimals
    pub applied_rebirth_decimal: StatSet,
    pub bonus: i64,
    /// Sum of the integer split plus the bonus; carried into the next stage
    pub final_rebirth_value: i64,
    /// Baseline this stage's agility is derived against
    pub final_stat_baseline: i64,
}

impl StageResult {
    /// The input that produced this result
    pub fn implied_input(&self) -> StageInput {
        StageInput::new(
            self.level,
            self.display_stats.con as u32,
            self.display_stats.wis as u32,
            self.display_stats.dex as u32,
        )
    }

    /// Applied rebirth actually credited: integer split plus bonus
    pub fn applied_total(&self) -> i64 {
        self.applied_rebirth_integer.total() as i64 + self.bonus
    }

    /// Applied rebirth before truncation to whole points: decimal split plus bonus
    pub fn decimal_total(&self) -> f64 {
        self.applied_rebirth_decimal.total() + self.bonus as f64
    }

    /// Per-field difference between the decimal and integer splits
    ///
    /// This is what the next stage adds onto its display stats.
    pub fn carried_remainder(&self) -> StatSet {
        self.applied_rebirth_decimal
            .zip_with(&self.applied_rebirth_integer, |decimal, integer| decimal - integer)
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining_points < 0
    }
}
