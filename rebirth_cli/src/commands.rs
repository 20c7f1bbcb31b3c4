//! Command handlers

use crate::BuildSource;
use anyhow::{bail, Context, Result};
use rebirth_core::config::find_preset;
use rebirth_core::{
    apply_stat_edit, available_points_with, default_presets, set_level, solve_with, EditableStat,
    RebirthBuild, RebirthConstants, StageInput, STAGE_COUNT,
};
use serde::Serialize;

const DEFAULT_PRESET: &str = "blank";

/// A single stage edit requested on the command line
#[derive(Debug, Clone, Default)]
pub struct StageEdit {
    pub stat: Option<EditableStat>,
    pub value: Option<i64>,
    pub level: Option<i64>,
}

#[derive(Debug, Serialize)]
struct BudgetReport {
    stage: usize,
    level: u32,
    available_points: i64,
    spent: f64,
    remaining_points: i64,
}

#[derive(Debug, Serialize)]
struct PresetSummary<'a> {
    id: &'a str,
    name: &'a str,
    description: Option<&'a str>,
}

pub fn solve(source: &BuildSource, pretty: bool) -> Result<String> {
    let (inputs, constants) = load(source)?;
    let solution = solve_with(&inputs, &constants);
    tracing::info!(
        iterations = solution.iterations,
        converged = solution.converged,
        "solved build"
    );
    to_json(&solution, pretty)
}

pub fn budget(source: &BuildSource, stage: usize) -> Result<String> {
    let index = stage_index(stage)?;
    let (inputs, constants) = load(source)?;
    let solution = solve_with(&inputs, &constants);

    let result = &solution.stages[index];
    let report = BudgetReport {
        stage,
        level: inputs[index].level,
        available_points: available_points_with(&constants, index, inputs[index].level, &solution.stages),
        spent: result.total_display,
        remaining_points: result.remaining_points,
    };
    to_json(&report, false)
}

pub fn edit(source: &BuildSource, stage: usize, change: &StageEdit) -> Result<String> {
    let index = stage_index(stage)?;
    let (mut inputs, constants) = load(source)?;

    if let Some(level) = change.level {
        inputs[index] = set_level(&inputs[index], level);
    }

    match (change.stat, change.value) {
        (Some(stat), Some(value)) => {
            // Budget comes from the build as it stands before this edit
            let previous = solve_with(&inputs, &constants);
            let budget = available_points_with(&constants, index, inputs[index].level, &previous.stages);
            inputs[index] = apply_stat_edit(&inputs[index], stat, value, budget);
            tracing::debug!(stage, ?stat, value, budget, "applied stat edit");
        }
        (None, None) => {}
        _ => bail!("--stat and --value must be given together"),
    }

    let build = RebirthBuild::from_inputs(&inputs);
    toml::to_string(&build).context("failed to serialize edited build")
}

pub fn presets(pretty: bool) -> Result<String> {
    let presets = default_presets();
    let summaries: Vec<PresetSummary> = presets
        .iter()
        .map(|preset| PresetSummary {
            id: &preset.id,
            name: &preset.name,
            description: preset.description.as_deref(),
        })
        .collect();
    to_json(&summaries, pretty)
}

fn load(source: &BuildSource) -> Result<([StageInput; STAGE_COUNT], RebirthConstants)> {
    let constants = match &source.constants {
        Some(path) => RebirthConstants::load(path)
            .with_context(|| format!("failed to load constants from {}", path.display()))?,
        None => RebirthConstants::default(),
    };

    let build = match (&source.build, &source.preset) {
        (Some(path), _) => RebirthBuild::load(path)
            .with_context(|| format!("failed to load build from {}", path.display()))?,
        (None, preset) => {
            let id = preset.as_deref().unwrap_or(DEFAULT_PRESET);
            let presets = default_presets();
            match find_preset(&presets, id) {
                Some(preset) => preset.build(),
                None => bail!("unknown preset '{}'", id),
            }
        }
    };

    let inputs = build.to_inputs().context("invalid build")?;
    Ok((inputs, constants))
}

/// Convert a 1-based stage number into an index
fn stage_index(stage: usize) -> Result<usize> {
    if stage == 0 || stage > STAGE_COUNT {
        bail!("stage must be between 1 and {}, got {}", STAGE_COUNT, stage);
    }
    Ok(stage - 1)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
