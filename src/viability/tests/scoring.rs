use super::common::*;

use crate::viability::config::EngineConfig;
use crate::viability::domain::{DeliveryFormat, ModelInputs};
use crate::viability::models::{CeuModel, FullProgramModel, ModelOutcome};
use crate::viability::scoring::{ScoringPolicy, ViabilityRule, PROVISIONAL_CAVEAT};

fn full(inputs: &ModelInputs) -> ModelOutcome {
    FullProgramModel::new(&EngineConfig::standard()).run(inputs)
}

fn ceu(inputs: &ModelInputs) -> ModelOutcome {
    CeuModel::new(&EngineConfig::standard()).run(inputs)
}

fn points(outcome: &ModelOutcome) -> Vec<(ViabilityRule, i16)> {
    outcome
        .viability
        .rationale
        .iter()
        .map(|rule| (rule.rule, rule.points))
        .collect()
}

#[test]
fn full_program_rules_are_scored_independently() {
    let outcome = full(&full_program_inputs());

    assert_eq!(
        points(&outcome),
        vec![
            (ViabilityRule::LongRunMargin, 3),
            (ViabilityRule::BreakEvenEfficiency, 0),
            (ViabilityRule::GrantOffset, 1),
            (ViabilityRule::SecondYearSolvency, 2),
            (ViabilityRule::BoundedLaunchLoss, 1),
            (ViabilityRule::LeanDelivery, 0),
        ]
    );
    assert_eq!(outcome.viability.raw_score, 7);
    assert_eq!(outcome.viability.caveat, PROVISIONAL_CAVEAT);
}

#[test]
fn lean_delivery_earns_its_point() {
    let mut hybrid = full_program_inputs();
    hybrid.delivery_format = DeliveryFormat::Hybrid;
    assert_eq!(full(&hybrid).viability.score, 8);

    let mut online = full_program_inputs();
    online.delivery_format = DeliveryFormat::Online;
    assert_eq!(full(&online).viability.score, 8);
}

#[test]
fn rationale_lines_name_measure_and_threshold() {
    let outcome = full(&full_program_inputs());
    let lines = outcome.viability.rationale_lines();

    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("Long-run margin: year-3 margin 46.5%"));
    assert!(lines[0].ends_with("+3 points"));
    assert!(lines[2].ends_with("+1 point"));
    assert!(lines[4].contains("year-1 loss $14,433"));
}

#[test]
fn score_is_clamped_to_one_when_every_rule_fails() {
    let mut weak = full_program_inputs();
    weak.tuition_estimate = 150.0;
    weak.grant_eligible = false;

    let outcome = full(&weak);
    assert_eq!(outcome.viability.raw_score, 0);
    assert_eq!(outcome.viability.score, 1);
    assert!(outcome.viability.rationale.iter().all(|rule| !rule.passed));
}

#[test]
fn profitable_launch_counts_as_bounded_loss() {
    let mut strong = full_program_inputs();
    strong.tuition_estimate = 9_000.0;
    strong.has_existing_lab_space = true;

    let outcome = full(&strong);
    let launch = outcome
        .viability
        .rationale
        .iter()
        .find(|rule| rule.rule == ViabilityRule::BoundedLaunchLoss)
        .expect("launch rule");
    assert!(launch.passed);
    assert_eq!(launch.measured, "no year-1 loss");
}

#[test]
fn continuing_education_deducts_from_ceiling() {
    let outcome = ceu(&ceu_inputs());
    assert_eq!(outcome.viability.raw_score, 10);
    assert!(outcome.viability.rationale.iter().all(|rule| rule.points == 0));

    let mut thin = ceu_inputs();
    thin.tuition_estimate = 30.0;
    let outcome = ceu(&thin);
    assert_eq!(
        points(&outcome),
        vec![
            (ViabilityRule::ContinuingEducationMargin, -3),
            (ViabilityRule::ContinuingEducationNetPosition, -2),
            (ViabilityRule::ContinuingEducationBreakEven, -2),
        ]
    );
    assert_eq!(outcome.viability.score, 3);
}

#[test]
fn continuing_education_flags_tuition_below_materials() {
    let mut underwater = ceu_inputs();
    underwater.tuition_estimate = 5.0;

    let outcome = ceu(&underwater);
    assert!(!outcome.break_even.is_reachable());
    assert_eq!(outcome.break_even.enrollment(), 25);

    let rule = outcome
        .viability
        .rationale
        .iter()
        .find(|rule| rule.rule == ViabilityRule::ContinuingEducationBreakEven)
        .expect("break-even rule");
    assert!(rule.measured.contains("unreachable"));
}

#[test]
fn policy_overrides_change_thresholds() {
    let mut config = EngineConfig::standard();
    config.scoring.full_program.launch_loss_threshold = 10_000.0;
    config.scoring.full_program.break_even_cohort_fraction = 1.2;

    let outcome = FullProgramModel::new(&config).run(&full_program_inputs());
    let by_rule = |wanted: ViabilityRule| {
        outcome
            .viability
            .rationale
            .iter()
            .find(|rule| rule.rule == wanted)
            .map(|rule| rule.passed)
    };
    assert_eq!(by_rule(ViabilityRule::BoundedLaunchLoss), Some(false));
    assert_eq!(by_rule(ViabilityRule::BreakEvenEfficiency), Some(true));
    assert_eq!(outcome.viability.score, 8);
}

#[test]
fn clamp_respects_policy_bounds() {
    let policy = ScoringPolicy::standard();
    assert_eq!(policy.clamp(-4), 1);
    assert_eq!(policy.clamp(7), 7);
    assert_eq!(policy.clamp(14), 10);
}
