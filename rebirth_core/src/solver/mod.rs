//! Convergence driver
//!
//! The five stages form one circular system: a stage's agility depends on
//! its own baseline, the baseline depends on the previous stage's final
//! rebirth value, and that value depends on the previous stage's agility.
//! We iterate the whole chain until neither baselines nor agility move by
//! more than the tolerance, or the iteration cap is reached.

mod state;

pub use state::ConvergenceState;

use crate::config::{ConfigError, RebirthBuild, RebirthConstants};
use crate::stage::{evaluate_stage, StageContext, StageResult};
use crate::types::{StageInput, STAGE_COUNT};
use serde::{Deserialize, Serialize};

/// Solved stages plus how the iteration ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub stages: [StageResult; STAGE_COUNT],
    /// Passes over all five stages
    pub iterations: u32,
    /// `false` when the iteration cap was hit first; `stages` is then the last pass
    pub converged: bool,
    /// Largest baseline/agility change in the last pass
    pub max_delta: f64,
}

impl Solution {
    pub fn final_stat_baselines(&self) -> [i64; STAGE_COUNT] {
        std::array::from_fn(|i| self.stages[i].final_stat_baseline)
    }

    pub fn final_rebirth_values(&self) -> [i64; STAGE_COUNT] {
        std::array::from_fn(|i| self.stages[i].final_rebirth_value)
    }

    /// The inputs these stages were solved from
    pub fn implied_inputs(&self) -> [StageInput; STAGE_COUNT] {
        std::array::from_fn(|i| self.stages[i].implied_input())
    }
}

/// Solve all five stages with the default constants
pub fn solve(inputs: &[StageInput; STAGE_COUNT]) -> [StageResult; STAGE_COUNT] {
    solve_with(inputs, &RebirthConstants::default()).stages
}

/// Solve all five stages under `constants`
///
/// Never fails: if the cap is reached the last pass is returned with
/// `converged == false`.
pub fn solve_with(inputs: &[StageInput; STAGE_COUNT], constants: &RebirthConstants) -> Solution {
    let max_iterations = constants.convergence.max_iterations.max(1);
    let tolerance = constants.convergence.tolerance;

    let mut state = ConvergenceState::initial(constants);
    let mut iterations = 0;

    loop {
        let stages = evaluate_pass(inputs, constants, &state);
        let next = ConvergenceState::from_results(&stages);
        let max_delta = state.max_delta(&next);
        state = next;
        iterations += 1;

        let converged = max_delta < tolerance;
        if converged || iterations >= max_iterations {
            if converged {
                tracing::debug!(iterations, max_delta, "rebirth stages converged");
            } else {
                tracing::warn!(
                    iterations,
                    max_delta,
                    tolerance,
                    "rebirth stages did not converge, returning last pass"
                );
            }
            return Solution {
                stages,
                iterations,
                converged,
                max_delta,
            };
        }
    }
}

/// Validate a build and solve it
pub fn solve_build(build: &RebirthBuild, constants: &RebirthConstants) -> Result<Solution, ConfigError> {
    let inputs = build.to_inputs()?;
    Ok(solve_with(&inputs, constants))
}

/// One left-to-right pass; later stages see this pass's earlier results
fn evaluate_pass(
    inputs: &[StageInput; STAGE_COUNT],
    constants: &RebirthConstants,
    state: &ConvergenceState,
) -> [StageResult; STAGE_COUNT] {
    let mut stages = [StageResult::default(); STAGE_COUNT];

    for (index, input) in inputs.iter().enumerate() {
        let prior_baseline = state.baselines[index];
        let prior_agi = state.agi[index];

        stages[index] = match index.checked_sub(1) {
            None => evaluate_stage(constants, input, &StageContext::first(prior_baseline, prior_agi)),
            Some(p) => {
                let previous = stages[p];
                let ctx = StageContext::after(index, &previous, prior_baseline, prior_agi);
                evaluate_stage(constants, input, &ctx)
            }
        };
    }

    stages
}
