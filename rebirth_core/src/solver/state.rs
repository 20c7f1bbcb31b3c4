//! Fixed-point state carried between iterations

use crate::config::RebirthConstants;
use crate::stage::StageResult;
use crate::types::STAGE_COUNT;

/// Per-stage baseline and agility from the last completed iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceState {
    pub baselines: [f64; STAGE_COUNT],
    pub agi: [f64; STAGE_COUNT],
}

impl ConvergenceState {
    /// Starting point: `[437, 417, 417, 417, 417]` baselines, zero agility
    pub fn initial(constants: &RebirthConstants) -> Self {
        ConvergenceState {
            baselines: std::array::from_fn(|i| constants.initial_baseline(i) as f64),
            agi: [0.0; STAGE_COUNT],
        }
    }

    pub fn from_results(results: &[StageResult; STAGE_COUNT]) -> Self {
        ConvergenceState {
            baselines: std::array::from_fn(|i| results[i].final_stat_baseline as f64),
            agi: std::array::from_fn(|i| results[i].display_stats.agi),
        }
    }

    /// Largest absolute change across both vectors
    pub fn max_delta(&self, other: &ConvergenceState) -> f64 {
        let baselines = self.baselines.iter().zip(other.baselines.iter());
        let agi = self.agi.iter().zip(other.agi.iter());
        baselines
            .chain(agi)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}
