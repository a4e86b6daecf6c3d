mod ceu;
mod config;
mod rules;

pub use config::{ContinuingEducationRubric, FullProgramRubric, ScoringPolicy};

use serde::{Deserialize, Serialize};

use super::break_even::BreakEven;
use super::domain::{ModelInputs, YearlyProjection};

pub const PROVISIONAL_CAVEAT: &str = "Provisional score: instructor cost rests on benchmark seat-hour estimates \
and should be re-run once curriculum-derived seat-time data is available. Expected accuracy is within 1-2 points.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViabilityRule {
    LongRunMargin,
    BreakEvenEfficiency,
    GrantOffset,
    SecondYearSolvency,
    BoundedLaunchLoss,
    LeanDelivery,
    ContinuingEducationMargin,
    ContinuingEducationNetPosition,
    ContinuingEducationBreakEven,
}

impl ViabilityRule {
    pub const fn label(self) -> &'static str {
        match self {
            ViabilityRule::LongRunMargin => "Long-run margin",
            ViabilityRule::BreakEvenEfficiency => "Break-even efficiency",
            ViabilityRule::GrantOffset => "Grant offset",
            ViabilityRule::SecondYearSolvency => "Second-year solvency",
            ViabilityRule::BoundedLaunchLoss => "Bounded launch loss",
            ViabilityRule::LeanDelivery => "Lean delivery",
            ViabilityRule::ContinuingEducationMargin => "Section margin",
            ViabilityRule::ContinuingEducationNetPosition => "Net position floor",
            ViabilityRule::ContinuingEducationBreakEven => "Per-section break-even",
        }
    }
}

/// One evaluated rule: what was measured, what it was held against, and the point delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule: ViabilityRule,
    pub measured: String,
    pub threshold: String,
    pub passed: bool,
    pub points: i16,
}

impl RuleOutcome {
    pub fn line(&self) -> String {
        format!(
            "{}: {} (threshold {}) -> {:+} point{}",
            self.rule.label(),
            self.measured,
            self.threshold,
            self.points,
            if self.points.abs() == 1 { "" } else { "s" }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViabilityAssessment {
    pub score: u8,
    pub raw_score: i16,
    pub rationale: Vec<RuleOutcome>,
    pub caveat: String,
}

impl ViabilityAssessment {
    pub fn rationale_lines(&self) -> Vec<String> {
        self.rationale.iter().map(RuleOutcome::line).collect()
    }
}

/// Applies the configured rubric to base-scenario projections.
pub struct ViabilityScorer<'a> {
    policy: &'a ScoringPolicy,
}

impl<'a> ViabilityScorer<'a> {
    pub fn new(policy: &'a ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn score_full_program(
        &self,
        base: &[YearlyProjection; 3],
        break_even: &BreakEven,
        inputs: &ModelInputs,
    ) -> ViabilityAssessment {
        let (rationale, raw_score) =
            rules::score_full_program(base, break_even, inputs, &self.policy.full_program);
        self.assessment(rationale, raw_score)
    }

    pub fn score_continuing_education(
        &self,
        year_one: &YearlyProjection,
        break_even: &BreakEven,
    ) -> ViabilityAssessment {
        let (rationale, raw_score) = ceu::score_continuing_education(
            year_one,
            break_even,
            &self.policy.continuing_education,
        );
        self.assessment(rationale, raw_score)
    }

    fn assessment(&self, rationale: Vec<RuleOutcome>, raw_score: i16) -> ViabilityAssessment {
        ViabilityAssessment {
            score: self.policy.clamp(raw_score),
            raw_score,
            rationale,
            caveat: PROVISIONAL_CAVEAT.to_string(),
        }
    }
}
