use super::super::break_even::BreakEven;
use super::super::domain::{ModelInputs, YearlyProjection};
use super::super::format::{currency, percent};
use super::config::FullProgramRubric;
use super::{RuleOutcome, ViabilityRule};

fn outcome(
    rule: ViabilityRule,
    measured: String,
    threshold: String,
    passed: bool,
    points: i16,
) -> RuleOutcome {
    RuleOutcome {
        rule,
        measured,
        threshold,
        passed,
        points: if passed { points } else { 0 },
    }
}

/// Evaluate each full-program rule independently against the base branch.
pub(crate) fn score_full_program(
    base: &[YearlyProjection; 3],
    break_even: &BreakEven,
    inputs: &ModelInputs,
    rubric: &FullProgramRubric,
) -> (Vec<RuleOutcome>, i16) {
    let [year_one, year_two, year_three] = base;
    let mut components = Vec::with_capacity(6);

    components.push(outcome(
        ViabilityRule::LongRunMargin,
        format!("year-3 margin {}", percent(year_three.margin)),
        format!(">= {}", percent(rubric.long_run_margin_threshold)),
        year_three.margin >= rubric.long_run_margin_threshold,
        rubric.long_run_margin_points,
    ));

    let target = inputs.target_cohort();
    let break_even_limit = f64::from(target) * rubric.break_even_cohort_fraction;
    let break_even_threshold = format!(
        "<= {:.1} students ({} of {target}-student cohort)",
        break_even_limit,
        percent(rubric.break_even_cohort_fraction)
    );
    components.push(match break_even {
        BreakEven::Reachable { enrollment } => outcome(
            ViabilityRule::BreakEvenEfficiency,
            format!("break-even at {enrollment} students"),
            break_even_threshold,
            f64::from(*enrollment) <= break_even_limit,
            rubric.break_even_points,
        ),
        BreakEven::Unreachable { sentinel } => outcome(
            ViabilityRule::BreakEvenEfficiency,
            format!(
                "break-even unreachable by enrollment: per-student cost after overhead meets or exceeds tuition (reported as {sentinel})"
            ),
            break_even_threshold,
            false,
            rubric.break_even_points,
        ),
    });

    let grant = year_one.revenue.grant;
    let shortfall_without_grant = (grant - year_one.net_position).max(0.0);
    let grant_threshold = format!(
        ">= {} of year-1 shortfall without grant",
        percent(rubric.grant_offset_fraction)
    );
    components.push(if inputs.grant_eligible {
        outcome(
            ViabilityRule::GrantOffset,
            format!(
                "grant {} against shortfall {}",
                currency(grant),
                currency(shortfall_without_grant)
            ),
            grant_threshold,
            grant >= rubric.grant_offset_fraction * shortfall_without_grant,
            rubric.grant_offset_points,
        )
    } else {
        outcome(
            ViabilityRule::GrantOffset,
            "not grant-eligible".to_string(),
            grant_threshold,
            false,
            rubric.grant_offset_points,
        )
    });

    components.push(outcome(
        ViabilityRule::SecondYearSolvency,
        format!("year-2 net position {}", currency(year_two.net_position)),
        "> $0".to_string(),
        year_two.net_position > 0.0,
        rubric.second_year_points,
    ));

    let launch_loss = (-year_one.net_position).max(0.0);
    components.push(outcome(
        ViabilityRule::BoundedLaunchLoss,
        if launch_loss > 0.0 {
            format!("year-1 loss {}", currency(launch_loss))
        } else {
            "no year-1 loss".to_string()
        },
        format!("<= {}", currency(rubric.launch_loss_threshold)),
        launch_loss <= rubric.launch_loss_threshold,
        rubric.launch_loss_points,
    ));

    components.push(outcome(
        ViabilityRule::LeanDelivery,
        format!("delivery format {}", inputs.delivery_format.label()),
        "hybrid or online".to_string(),
        inputs.delivery_format.is_lean(),
        rubric.lean_delivery_points,
    ));

    let total_score = components.iter().map(|component| component.points).sum();
    (components, total_score)
}
