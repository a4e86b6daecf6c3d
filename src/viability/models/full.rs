use super::super::break_even::{BreakEven, BreakEvenTerms, EnrollmentBasis};
use super::super::config::EngineConfig;
use super::super::domain::{scale_enrollment, ModelInputs, Scenario, ScenarioSet, YearlyProjection};
use super::super::format::currency;
use super::super::projection::ProjectionCalculator;
use super::super::scoring::ViabilityScorer;
use super::ModelOutcome;

/// Long-form model for credential and licensure programs.
pub struct FullProgramModel<'a> {
    config: &'a EngineConfig,
}

impl<'a> FullProgramModel<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, inputs: &ModelInputs) -> ModelOutcome {
        let scenarios = self.scenario_set(inputs);
        let break_even = self.break_even(inputs);
        let viability = ViabilityScorer::new(&self.config.scoring).score_full_program(
            &scenarios.base,
            &break_even,
            inputs,
        );
        let grant_impact_summary = self.grant_impact_summary(inputs, &scenarios.base[0]);

        ModelOutcome {
            scenarios,
            break_even,
            break_even_basis: EnrollmentBasis::PerCohort,
            viability,
            grant_impact_summary,
        }
    }

    pub fn scenario_set(&self, inputs: &ModelInputs) -> ScenarioSet {
        let enrollment = &self.config.enrollment;
        ScenarioSet {
            pessimistic: self.branch(inputs, Scenario::Pessimistic, enrollment.pessimistic_fill),
            base: self.branch(inputs, Scenario::Base, enrollment.base_fill),
            optimistic: self.branch(inputs, Scenario::Optimistic, enrollment.optimistic_fill),
        }
    }

    fn branch(&self, inputs: &ModelInputs, scenario: Scenario, fill: f64) -> [YearlyProjection; 3] {
        let calculator = ProjectionCalculator::new(&self.config.benchmarks);
        let growth = &self.config.enrollment;

        let year_one = scale_enrollment(inputs.target_cohort(), fill);
        let year_two = scale_enrollment(year_one, 1.0 + growth.year_two_growth);
        let year_three = scale_enrollment(year_two, 1.0 + growth.year_three_growth);

        [
            calculator.project(inputs, 1, scenario, year_one),
            calculator.project(inputs, 2, scenario, year_two),
            calculator.project(inputs, 3, scenario, year_three),
        ]
    }

    /// Solved against the year-one cost structure, launch costs included.
    pub fn break_even(&self, inputs: &ModelInputs) -> BreakEven {
        self.break_even_terms(inputs).solve(inputs.target_cohort())
    }

    pub fn break_even_terms(&self, inputs: &ModelInputs) -> BreakEvenTerms {
        let benchmarks = &self.config.benchmarks;
        let calculator = ProjectionCalculator::new(benchmarks);

        BreakEvenTerms {
            tuition: inputs.tuition_estimate,
            fixed_direct: calculator.fixed_direct_costs(inputs, 1).sum(),
            variable_per_student: benchmarks.supplies_per_student.value,
            overhead_factor: benchmarks.overhead_factor(),
            grant_revenue: calculator.grant_revenue(inputs),
        }
    }

    fn grant_impact_summary(&self, inputs: &ModelInputs, year_one: &YearlyProjection) -> String {
        let award = &self.config.benchmarks.grant_award.value;
        let midpoint = award.midpoint();

        if inputs.grant_eligible {
            let without = year_one.net_position - year_one.revenue.grant;
            format!(
                "Grant eligibility adds {} per year (midpoint of the {} award range). Year-1 base net position is {} with the grant and {} without it.",
                currency(year_one.revenue.grant),
                award,
                currency(year_one.net_position),
                currency(without)
            )
        } else {
            format!(
                "Not grant-eligible; projections carry no grant revenue. A typical award of {} ({} range) would move year-1 base net position from {} to {}.",
                currency(midpoint),
                award,
                currency(year_one.net_position),
                currency(year_one.net_position + midpoint)
            )
        }
    }
}
