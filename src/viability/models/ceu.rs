use super::super::break_even::{BreakEven, BreakEvenTerms, EnrollmentBasis};
use super::super::config::EngineConfig;
use super::super::domain::{scale_enrollment, ModelInputs, Scenario, ScenarioSet, YearlyProjection};
use super::super::projection::ProjectionCalculator;
use super::super::scoring::ViabilityScorer;
use super::ModelOutcome;

/// Short-form model for continuing-education offerings: low tuition, high volume,
/// priced per section. `cohort_size` is seats per section and `total_seat_hours`
/// is contact hours per section.
pub struct CeuModel<'a> {
    config: &'a EngineConfig,
}

impl<'a> CeuModel<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, inputs: &ModelInputs) -> ModelOutcome {
        let scenarios = self.scenario_set(inputs);
        let break_even = self.break_even(inputs);
        let viability = ViabilityScorer::new(&self.config.scoring)
            .score_continuing_education(&scenarios.base[0], &break_even);

        ModelOutcome {
            scenarios,
            break_even,
            break_even_basis: EnrollmentBasis::PerSection,
            viability,
            grant_impact_summary:
                "Continuing-education offerings carry no grant revenue; projections rest on tuition alone."
                    .to_string(),
        }
    }

    /// Students across all planned sections in year one.
    pub fn planned_volume(&self, inputs: &ModelInputs) -> u32 {
        inputs
            .target_cohort()
            .saturating_mul(inputs.sections_per_year)
    }

    pub fn scenario_set(&self, inputs: &ModelInputs) -> ScenarioSet {
        let assumptions = &self.config.enrollment.continuing_education;
        ScenarioSet {
            pessimistic: self.branch(inputs, Scenario::Pessimistic, assumptions.pessimistic_fill),
            base: self.branch(inputs, Scenario::Base, assumptions.base_fill),
            optimistic: self.branch(inputs, Scenario::Optimistic, assumptions.optimistic_fill),
        }
    }

    fn branch(&self, inputs: &ModelInputs, scenario: Scenario, fill: f64) -> [YearlyProjection; 3] {
        let calculator = ProjectionCalculator::new(&self.config.benchmarks);
        let growth = 1.0 + self.config.enrollment.continuing_education.annual_growth;
        let seats = inputs.target_cohort();

        let year_one = scale_enrollment(self.planned_volume(inputs), fill);
        let year_two = scale_enrollment(year_one, growth);
        let year_three = scale_enrollment(year_two, growth);

        [
            (1, year_one),
            (2, year_two),
            (3, year_three),
        ]
        .map(|(year, students)| {
            calculator.project_continuing_education(
                inputs,
                year,
                scenario,
                students,
                sections_for(students, seats),
            )
        })
    }

    /// Students needed in a single section to cover that section's instructor cost
    /// plus its share of the annual fixed costs.
    pub fn break_even(&self, inputs: &ModelInputs) -> BreakEven {
        self.break_even_terms(inputs).solve(inputs.target_cohort())
    }

    pub fn break_even_terms(&self, inputs: &ModelInputs) -> BreakEvenTerms {
        let benchmarks = &self.config.benchmarks;
        let calculator = ProjectionCalculator::new(benchmarks);
        let fixed_share = benchmarks.ceu.fixed_costs() / f64::from(inputs.sections_per_year.max(1));

        BreakEvenTerms {
            tuition: inputs.tuition_estimate,
            fixed_direct: calculator.section_instructor_cost(inputs) + fixed_share,
            variable_per_student: benchmarks.ceu.materials_per_student.value,
            overhead_factor: 1.0,
            grant_revenue: 0.0,
        }
    }
}

fn sections_for(students: u32, seats_per_section: u32) -> u32 {
    if students == 0 {
        0
    } else {
        students.div_ceil(seats_per_section.max(1))
    }
}
