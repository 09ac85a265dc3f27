//! Stage counts on real chemical pairs from the built-in table.

use mc_column::{
    MAX_PERMITTED_STEPS, OperatingLine, Section, StageCount, TowerSpec, count_stages, design,
    effective_curve, sweep_reflux,
};
use mc_thermo::{AntoineTable, BinarySystem, ChemicalPair};
use proptest::prelude::*;

fn system(light: &str, heavy: &str) -> BinarySystem {
    BinarySystem::new(ChemicalPair::new(light, heavy), &AntoineTable::builtin()).unwrap()
}

#[test]
fn ethanol_nonane_with_partial_efficiency() {
    let sys = system("ethanol", "n-nonane");
    let spec = TowerSpec::new(2.5, 0.1, 0.4, 0.95, 0.95).unwrap();
    let result = design(sys.curve(), &spec);

    let n = result.steps.stages().expect("design should converge");
    assert!(n < 10, "n = {n}");
    assert!(1 < result.feed_step && result.feed_step < n, "feed = {}", result.feed_step);
}

#[test]
fn ethanol_nonane_feed_stage_is_first_stripping_step() {
    let sys = system("ethanol", "n-nonane");
    let spec = TowerSpec::new(2.5, 0.1, 0.4, 0.95, 0.95).unwrap();
    let result = design(sys.curve(), &spec);

    let first_stripping = result
        .trace
        .iter()
        .position(|s| s.section == Some(Section::Stripping))
        .unwrap();
    assert_eq!(result.feed_step, first_stripping + 1);
    assert!(
        result.trace[..first_stripping]
            .iter()
            .all(|s| s.section == Some(Section::Rectifying))
    );
}

// As R -> 0 the rectifying line flattens to y = xD and meets this curve near
// x = 0.64. A feed below that pinches the staircase in the rectifying section.
#[test]
fn vanishing_reflux_hits_step_ceiling() {
    let sys = system("ethanol", "n-nonane");
    let spec = TowerSpec::ideal(1e-6, 0.1, 0.5, 0.95).unwrap();
    let result = design(sys.curve(), &spec);

    assert_eq!(result.steps, StageCount::NotConverged);
    assert_eq!(result.steps.to_string(), "N/A");
    assert_eq!(result.trace.len(), MAX_PERMITTED_STEPS);
}

#[test]
fn vanishing_reflux_with_feed_above_pinch_converges() {
    let sys = system("ethanol", "n-nonane");
    let spec = TowerSpec::ideal(1e-6, 0.1, 0.94, 0.95).unwrap();
    let result = design(sys.curve(), &spec);

    assert!(result.steps.is_converged(), "{}", result.steps);
    assert!(result.trace.len() < MAX_PERMITTED_STEPS);
}

#[test]
fn benzene_toluene_efficiency_adds_stages() {
    let sys = system("benzene", "toluene");
    let ideal = TowerSpec::ideal(3.0, 0.05, 0.4, 0.95).unwrap();
    let real = ideal.with_murphree(0.7).unwrap();

    let n_ideal = design(sys.curve(), &ideal).steps.stages().unwrap();
    let n_real = design(sys.curve(), &real).steps.stages().unwrap();
    assert!(n_real > n_ideal, "{n_real} <= {n_ideal}");
}

#[test]
fn design_matches_manual_pipeline() {
    let sys = system("benzene", "toluene");
    let spec = TowerSpec::new(4.0, 0.05, 0.4, 0.95, 0.8).unwrap();

    let line = OperatingLine::from_spec(&spec);
    let eff = effective_curve(&spec, &line, sys.curve()).unwrap();
    let manual = count_stages(sys.curve(), &line, Some(&eff));
    assert_eq!(manual, design(sys.curve(), &spec));
}

#[test]
fn sweep_counts_do_not_increase_with_reflux() {
    let sys = system("benzene", "toluene");
    let base = TowerSpec::ideal(2.0, 0.05, 0.4, 0.95).unwrap();
    let ratios: Vec<f64> = (0..9).map(|i| 2.0 + i as f64).collect();
    let rows = sweep_reflux(sys.curve(), &base, &ratios);

    assert_eq!(rows.len(), ratios.len());
    let counts: Vec<usize> = rows
        .iter()
        .map(|p| p.result.steps.stages().unwrap())
        .collect();
    for pair in counts.windows(2) {
        assert!(pair[1] <= pair[0], "{counts:?}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn more_reflux_never_needs_more_stages(r1 in 2.0_f64..10.0, r2 in 2.0_f64..10.0) {
        let sys = system("benzene", "toluene");
        let (lo, hi) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
        let at = |r: f64| {
            let spec = TowerSpec::ideal(r, 0.05, 0.4, 0.95).unwrap();
            design(sys.curve(), &spec).steps.stages().unwrap()
        };
        prop_assert!(at(hi) <= at(lo));
    }
}
