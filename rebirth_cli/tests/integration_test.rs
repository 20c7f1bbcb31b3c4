//! Integration test: Load preset -> Solve -> Check budget -> Edit -> Re-solve
//!
//! Walks the same path an editor takes when a user changes one stage.

use rebirth_core::config::find_preset;
use rebirth_core::prelude::*;

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

/// Helper to print every stage of a solution
fn print_solution(solution: &Solution) {
    println!(
        "  iterations: {}, converged: {}, max delta: {:.4}",
        solution.iterations, solution.converged, solution.max_delta
    );
    for (i, stage) in solution.stages.iter().enumerate() {
        let stats = &stage.display_stats;
        println!(
            "  Stage {}: L{} con {} wis {} dex {} agi {} | coeff {} rebirth {} baseline {} remaining {}",
            i + 1,
            stage.level,
            stats.con,
            stats.wis,
            stats.dex,
            stats.agi,
            stage.rebirth_coefficient,
            stage.final_rebirth_value,
            stage.final_stat_baseline,
            stage.remaining_points
        );
    }
}

#[test]
fn test_full_edit_flow() {
    let constants = RebirthConstants::default();

    // ========================================================================
    // Step 1: Load the transition preset
    // ========================================================================
    separator("STEP 1: Load Preset");

    let presets = default_presets();
    let preset = find_preset(&presets, "transition").expect("transition preset is built in");
    println!("  Loaded '{}' ({})", preset.name, preset.id);

    let mut inputs = preset.build().to_inputs().expect("preset is valid");
    assert_eq!(inputs[3], StageInput::new(137, 89, 385, 2));

    // ========================================================================
    // Step 2: Solve
    // ========================================================================
    separator("STEP 2: Solve");

    let solution = solve_with(&inputs, &constants);
    print_solution(&solution);

    assert!(solution.converged);
    assert_eq!(solution.iterations, 5);
    assert_eq!(solution.final_rebirth_values(), [65, 97, 130, 160, 192]);
    assert_eq!(solution.final_stat_baselines(), [437, 482, 514, 547, 577]);

    let fourth = &solution.stages[3];
    assert!((fourth.display_stats.agi - 62.0).abs() < 1e-9);
    assert_eq!(fourth.rebirth_coefficient, 119);
    assert_eq!(fourth.cumulative_levels, 557);
    assert!((fourth.applied_rebirth_decimal.wis - 85.53).abs() < 1e-9);

    // ========================================================================
    // Step 3: Budget for stage 4
    // ========================================================================
    separator("STEP 3: Budget");

    // 130 carried from stage 3 + 3 * 136
    let budget = available_points(3, inputs[3].level, &solution.stages);
    println!("  Stage 4 budget: {}", budget);
    assert_eq!(budget, 538);

    // ========================================================================
    // Step 4: Move points into wisdom
    // ========================================================================
    separator("STEP 4: Edit");

    inputs[3] = apply_stat_edit(&inputs[3], EditableStat::Wis, 400, budget);
    println!("  Stage 4 now: {:?}", inputs[3]);
    assert_eq!(inputs[3], StageInput::new(137, 136, 400, 2));
    assert_eq!(inputs[3].edited_total(), budget as u64);

    // ========================================================================
    // Step 5: Re-solve
    // ========================================================================
    separator("STEP 5: Re-solve");

    let edited = solve_with(&inputs, &constants);
    print_solution(&edited);

    assert!(edited.converged);
    // Earlier stages do not depend on later ones
    assert_eq!(edited.stages[..3], solution.stages[..3]);
    // Every point went to con/wis/dex, so agility has nothing left
    assert_eq!(edited.stages[3].display_stats.agi, 0.0);
    assert_eq!(edited.stages[3].remaining_points, 0);
    assert_eq!(edited.implied_inputs()[3], inputs[3]);

    // ========================================================================
    // Step 6: Save and reload
    // ========================================================================
    separator("STEP 6: Save");

    let saved = toml::to_string(&RebirthBuild::from_inputs(&inputs)).expect("build serializes");
    println!("{}", saved);
    let reloaded = RebirthBuild::parse(&saved).expect("saved build parses");
    assert_eq!(reloaded.to_inputs().expect("saved build is valid"), inputs);
}

#[test]
fn test_every_preset_converges() {
    let constants = RebirthConstants::default();

    for preset in default_presets() {
        let inputs = preset.build().to_inputs().expect("preset is valid");
        let solution = solve_with(&inputs, &constants);
        println!("  {}: {} iterations", preset.id, solution.iterations);

        assert!(solution.converged, "preset '{}' did not converge", preset.id);
        assert!(solution.iterations <= 6);
        assert_eq!(solution.stages[0].final_stat_baseline, 437);
    }
}
