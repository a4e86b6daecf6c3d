use super::super::break_even::BreakEven;
use super::super::domain::YearlyProjection;
use super::super::format::{currency, percent};
use super::config::ContinuingEducationRubric;
use super::{RuleOutcome, ViabilityRule};

fn penalty(
    rule: ViabilityRule,
    measured: String,
    threshold: String,
    passed: bool,
    penalty: i16,
) -> RuleOutcome {
    RuleOutcome {
        rule,
        measured,
        threshold,
        passed,
        points: if passed { 0 } else { -penalty.abs() },
    }
}

/// Start from the rubric ceiling and deduct for each failed check on the year-1 base projection.
pub(crate) fn score_continuing_education(
    year_one: &YearlyProjection,
    break_even: &BreakEven,
    rubric: &ContinuingEducationRubric,
) -> (Vec<RuleOutcome>, i16) {
    let mut components = Vec::with_capacity(3);

    components.push(penalty(
        ViabilityRule::ContinuingEducationMargin,
        format!("year-1 margin {}", percent(year_one.margin)),
        format!(">= {}", percent(rubric.margin_floor)),
        year_one.margin >= rubric.margin_floor,
        rubric.margin_penalty,
    ));

    components.push(penalty(
        ViabilityRule::ContinuingEducationNetPosition,
        format!("year-1 net position {}", currency(year_one.net_position)),
        format!(">= {}", currency(rubric.minimum_net_position)),
        year_one.net_position >= rubric.minimum_net_position,
        rubric.net_position_penalty,
    ));

    let threshold = format!("<= {} students per section", rubric.max_break_even_per_section);
    components.push(match break_even {
        BreakEven::Reachable { enrollment } => penalty(
            ViabilityRule::ContinuingEducationBreakEven,
            format!("break-even at {enrollment} students per section"),
            threshold,
            *enrollment <= rubric.max_break_even_per_section,
            rubric.break_even_penalty,
        ),
        BreakEven::Unreachable { sentinel } => penalty(
            ViabilityRule::ContinuingEducationBreakEven,
            format!(
                "break-even unreachable: materials cost meets or exceeds tuition (reported as {sentinel})"
            ),
            threshold,
            false,
            rubric.break_even_penalty,
        ),
    });

    let deductions: i16 = components.iter().map(|component| component.points).sum();
    (components, rubric.ceiling + deductions)
}
