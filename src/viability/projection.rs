use super::benchmarks::CostBenchmarks;
use super::domain::{DirectCosts, Expenses, ModelInputs, Revenue, Scenario, YearlyProjection};

/// Computes single-year revenue, expenses, and net position from benchmark costs.
///
/// Stateless apart from the borrowed benchmark table; the same inputs always produce
/// the same projection.
pub struct ProjectionCalculator<'a> {
    benchmarks: &'a CostBenchmarks,
}

impl<'a> ProjectionCalculator<'a> {
    pub fn new(benchmarks: &'a CostBenchmarks) -> Self {
        Self { benchmarks }
    }

    /// Full-program year: seat-hour instructor cost, lab build-out in year one,
    /// and institutional overhead over all direct costs.
    pub fn project(
        &self,
        inputs: &ModelInputs,
        year: u8,
        scenario: Scenario,
        enrollment: u32,
    ) -> YearlyProjection {
        let students = f64::from(enrollment);
        let revenue = Revenue::new(
            students * inputs.tuition_estimate,
            self.grant_revenue(inputs),
        );

        let direct = DirectCosts {
            lab_supplies: students * self.benchmarks.supplies_per_student.value,
            ..self.fixed_direct_costs(inputs, year)
        };
        let admin_overhead = (direct.sum() * self.benchmarks.admin_overhead_pct.value).round();
        let expenses = Expenses::new(direct, admin_overhead);

        YearlyProjection::new(
            year,
            scenario,
            enrollment,
            inputs.sections_per_year,
            revenue,
            expenses,
        )
    }

    pub fn grant_revenue(&self, inputs: &ModelInputs) -> f64 {
        if inputs.grant_eligible {
            self.benchmarks.grant_mid()
        } else {
            0.0
        }
    }

    /// Every full-program cost line that does not move with enrollment.
    /// `lab_supplies` is left at zero.
    pub fn fixed_direct_costs(&self, inputs: &ModelInputs, year: u8) -> DirectCosts {
        let instructor_cost = inputs.total_seat_hours
            * inputs.effective_wage_rate()
            * f64::from(inputs.sections_per_year);
        let lab_setup = if year == 1 && !inputs.has_existing_lab_space {
            self.benchmarks.lab_setup_mid()
        } else {
            0.0
        };
        let marketing = if year == 1 {
            self.benchmarks.marketing_year_one.value
        } else {
            0.0
        };

        DirectCosts {
            instructor_cost,
            lab_setup,
            lab_supplies: 0.0,
            coordinator_cost: self.benchmarks.coordinator_cost(),
            marketing,
            regulatory: self.benchmarks.regulatory_mid(),
        }
    }

    /// Continuing-education year: per-section instructor cost, flat per-student
    /// materials, flat coordinator/marketing/regulatory lines, no lab, grant, or overhead.
    pub fn project_continuing_education(
        &self,
        inputs: &ModelInputs,
        year: u8,
        scenario: Scenario,
        enrollment: u32,
        sections: u32,
    ) -> YearlyProjection {
        let ceu = &self.benchmarks.ceu;
        let revenue = Revenue::new(f64::from(enrollment) * inputs.tuition_estimate, 0.0);

        let direct = DirectCosts {
            instructor_cost: self.section_instructor_cost(inputs) * f64::from(sections),
            lab_setup: 0.0,
            lab_supplies: f64::from(enrollment) * ceu.materials_per_student.value,
            coordinator_cost: ceu.coordinator.value,
            marketing: ceu.marketing.value,
            regulatory: ceu.regulatory.value,
        };
        let expenses = Expenses::new(direct, 0.0);

        YearlyProjection::new(year, scenario, enrollment, sections, revenue, expenses)
    }

    pub fn section_instructor_cost(&self, inputs: &ModelInputs) -> f64 {
        inputs.total_seat_hours * inputs.effective_wage_rate()
    }
}
