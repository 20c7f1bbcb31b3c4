//! Stat-point budget per stage and budget-respecting edits
//!
//! A stage may distribute `initial_points + points_per_level * (level - 1)`
//! points in the first rebirth, and
//! `previous.final_rebirth_value + points_per_level * (level - 1)` after that.
//! Editors ask for the budget before re-solving, using whatever results they
//! last had, so everything here tolerates missing later stages.

use crate::config::RebirthConstants;
use crate::stage::StageResult;
use crate::types::{EditableStat, StageInput};

/// Points a stage may distribute
///
/// `previous_final_rebirth` is the previous stage's final rebirth value; it is
/// ignored for stage 0. When a later stage has no previous value yet, the
/// budget is estimated from the earlier stages' bonuses.
pub fn stage_budget(
    constants: &RebirthConstants,
    index: usize,
    level: u32,
    previous_final_rebirth: Option<i64>,
) -> i64 {
    let level_points = constants.points.points_per_level * (level as i64 - 1);
    if index == 0 {
        return constants.points.initial_points + level_points;
    }

    let carried = previous_final_rebirth.unwrap_or_else(|| estimated_rebirth_before(constants, index));
    carried + level_points
}

/// Rough rebirth value carried into `index` when nothing has been solved yet
pub(crate) fn estimated_rebirth_before(constants: &RebirthConstants, index: usize) -> i64 {
    (0..index)
        .map(|i| constants.bonus(i) + constants.points.fallback_applied_estimate)
        .sum()
}

/// Points available at `stage_index`, using the default constants
///
/// `level` is the stage's current (possibly just edited) level. `results` may
/// be partial; only `results[stage_index - 1]` is read.
pub fn available_points(stage_index: usize, level: u32, results: &[StageResult]) -> i64 {
    available_points_with(&RebirthConstants::default(), stage_index, level, results)
}

/// Points available at `stage_index` under `constants`
pub fn available_points_with(
    constants: &RebirthConstants,
    stage_index: usize,
    level: u32,
    results: &[StageResult],
) -> i64 {
    let previous = stage_index
        .checked_sub(1)
        .and_then(|p| results.get(p))
        .map(|r| r.final_rebirth_value);
    stage_budget(constants, stage_index, level, previous)
}

/// Apply a user edit to one stat while keeping the stage within `budget`
///
/// - Editing constitution clamps it to what wisdom and dexterity leave free.
/// - Editing wisdom or dexterity clamps that stat to what the other one leaves
///   free, then hands every remaining point to constitution.
///
/// No stat ever drops below zero, even when the stage is already over budget.
pub fn apply_stat_edit(input: &StageInput, stat: EditableStat, value: i64, budget: i64) -> StageInput {
    let mut edited = *input;
    let requested = value.max(0);

    match stat {
        EditableStat::Con => {
            let max_con = budget - input.wis as i64 - input.dex as i64;
            edited.con = to_points(requested.min(max_con));
        }
        EditableStat::Wis | EditableStat::Dex => {
            let other = match stat {
                EditableStat::Wis => input.dex as i64,
                _ => input.wis as i64,
            };
            let adjusted = requested.min(budget - other).max(0);
            let con = budget - adjusted - other;

            match stat {
                EditableStat::Wis => edited.wis = to_points(adjusted),
                _ => edited.dex = to_points(adjusted),
            }
            edited.con = to_points(con);
        }
    }

    edited
}

/// Set a stage's level; anything below 1 becomes 1
pub fn set_level(input: &StageInput, value: i64) -> StageInput {
    StageInput {
        level: to_points(value).max(1),
        ..*input
    }
}

fn to_points(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}
