//! Single-pass stage evaluation
//!
//! Evaluates one stage from its input, the previous stage's result and the
//! baseline/agility values of the last iteration. Knows nothing about
//! convergence; the solver calls this repeatedly.
//!
//! Order of evaluation:
//! 1. `base_calc = base_stat_total - (initial_points + points_per_level * (level - 1))`
//! 2. `agi = max(0, prior_baseline - con - wis - dex - base_calc)`
//! 3. real stats = display stats + previous stage's carried remainder
//! 4. `coefficient = trunc(total_real / 12 + quests / 4 + (levels - 85 * stages) / 4)`
//! 5. coefficient split across the real stats, truncated to 2 and 0 decimals
//! 6. final rebirth value, baseline and remaining points

use super::StageResult;
use crate::budget::{estimated_rebirth_before, stage_budget};
use crate::config::RebirthConstants;
use crate::quantize::{trunc, trunc_whole};
use crate::types::{StageInput, StatSet};

/// Everything a stage needs from outside its own input
#[derive(Debug, Clone, Copy)]
pub struct StageContext<'a> {
    /// Stage index, 0..STAGE_COUNT
    pub index: usize,
    /// This iteration's result for the previous stage (`None` for stage 0)
    pub previous: Option<&'a StageResult>,
    /// This stage's own baseline from the previous iteration
    pub prior_final_stat_baseline: f64,
    /// This stage's own agility from the previous iteration
    pub prior_agi: f64,
    pub cumulative_quests_before: i64,
    pub cumulative_levels_before: i64,
}

impl<'a> StageContext<'a> {
    /// Context for stage 0
    pub fn first(prior_final_stat_baseline: f64, prior_agi: f64) -> Self {
        StageContext {
            index: 0,
            previous: None,
            prior_final_stat_baseline,
            prior_agi,
            cumulative_quests_before: 0,
            cumulative_levels_before: 0,
        }
    }

    /// Context for the stage following `previous`, taking running totals from it
    pub fn after(
        index: usize,
        previous: &'a StageResult,
        prior_final_stat_baseline: f64,
        prior_agi: f64,
    ) -> Self {
        StageContext {
            index,
            previous: Some(previous),
            prior_final_stat_baseline,
            prior_agi,
            cumulative_quests_before: previous.cumulative_quests,
            cumulative_levels_before: previous.cumulative_levels,
        }
    }
}

/// Evaluate one stage in a single pass
pub fn evaluate_stage(
    constants: &RebirthConstants,
    input: &StageInput,
    ctx: &StageContext<'_>,
) -> StageResult {
    let index = ctx.index;
    let level_points = constants.points.points_per_level * (input.level as i64 - 1);
    let base_calc =
        (constants.stages.base_stat_total - (constants.points.initial_points + level_points)) as f64;

    let con = input.con as f64;
    let wis = input.wis as f64;
    let dex = input.dex as f64;
    let agi = (ctx.prior_final_stat_baseline - con - wis - dex - base_calc).max(0.0);

    let display_stats = StatSet::new(con, wis, dex, agi);
    let total_display = display_stats.total();

    let real_stats = match (index, ctx.previous) {
        (0, _) | (_, None) => display_stats,
        (_, Some(previous)) => {
            display_stats.zip_with(&previous.carried_remainder(), |shown, carried| shown + carried)
        }
    };
    let total_real = real_stats.total();

    let quest = constants.quest_points(index);
    let cumulative_quests = ctx.cumulative_quests_before + quest;
    let cumulative_levels = ctx.cumulative_levels_before + input.level as i64;

    let coefficient = &constants.coefficient;
    let level_excess = cumulative_levels - coefficient.level_allowance * (index as i64 + 1);
    let rebirth_coefficient = trunc_whole(
        total_real / coefficient.stat_divisor as f64
            + cumulative_quests as f64 / coefficient.quest_divisor as f64
            + level_excess as f64 / coefficient.level_divisor as f64,
    ) as i64;

    // Guard the proportional split against an all-zero stage
    let (applied_rebirth_decimal, applied_rebirth_integer) = if total_real > 0.0 {
        let share = |stat: f64| (stat / total_real) * rebirth_coefficient as f64 + 0.5;
        (
            real_stats.map(|stat| trunc(share(stat), 2)),
            real_stats.map(|stat| trunc(share(stat), 0)),
        )
    } else {
        (StatSet::default(), StatSet::default())
    };

    let bonus = constants.bonus(index);
    let final_rebirth_value = applied_rebirth_integer.total() as i64 + bonus;

    let previous_rebirth = ctx.previous.map(|previous| previous.final_rebirth_value);
    let final_stat_baseline = if index == 0 {
        constants.stages.base_stat_total
    } else {
        constants.stages.carried_stat_base
            + previous_rebirth.unwrap_or_else(|| estimated_rebirth_before(constants, index))
    };

    // Display stats are whole points, so the total is exact
    let remaining_points =
        stage_budget(constants, index, input.level, previous_rebirth) - total_display as i64;

    tracing::trace!(
        stage = index,
        agi,
        agi_delta = agi - ctx.prior_agi,
        rebirth_coefficient,
        final_rebirth_value,
        final_stat_baseline,
        "evaluated stage"
    );

    StageResult {
        level: input.level,
        quest,
        display_stats,
        real_stats,
        total_display,
        total_real,
        remaining_points,
        cumulative_quests,
        cumulative_levels,
        rebirth_coefficient,
        applied_rebirth_integer,
        applied_rebirth_decimal,
        bonus,
        final_rebirth_value,
        final_stat_baseline,
    }
}
