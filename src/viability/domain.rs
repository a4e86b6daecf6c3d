use serde::{Deserialize, Serialize};

use super::wages::WageEstimate;

/// How instruction is delivered; hybrid and online programs run leaner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryFormat {
    #[default]
    InPerson,
    Hybrid,
    Online,
}

impl DeliveryFormat {
    pub const fn label(self) -> &'static str {
        match self {
            DeliveryFormat::InPerson => "in_person",
            DeliveryFormat::Hybrid => "hybrid",
            DeliveryFormat::Online => "online",
        }
    }

    pub const fn is_lean(self) -> bool {
        matches!(self, DeliveryFormat::Hybrid | DeliveryFormat::Online)
    }
}

/// Classification supplied by the upstream program-type classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramType {
    InitialLicensure,
    ContinuingEducation,
    NonLicensed,
    Unclear,
}

impl ProgramType {
    /// Unrecognised classifier output is treated as `Unclear`.
    pub fn from_classification(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "initial_licensure" => Self::InitialLicensure,
            "continuing_education" => Self::ContinuingEducation,
            "non_licensed" => Self::NonLicensed,
            _ => Self::Unclear,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ProgramType::InitialLicensure => "initial_licensure",
            ProgramType::ContinuingEducation => "continuing_education",
            ProgramType::NonLicensed => "non_licensed",
            ProgramType::Unclear => "unclear",
        }
    }
}

fn default_sections() -> u32 {
    1
}

/// Raw program parameters as received from a caller, before validation and wage resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramRequest {
    pub program_name: String,
    pub tuition_estimate: f64,
    pub cohort_size: u32,
    pub total_seat_hours: f64,
    #[serde(default = "default_sections")]
    pub sections_per_year: u32,
    #[serde(default)]
    pub has_existing_lab_space: bool,
    #[serde(default)]
    pub grant_eligible: bool,
    #[serde(default)]
    pub delivery_format: DeliveryFormat,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub client_wage_override: Option<f64>,
    #[serde(default)]
    pub client_cohort_override: Option<u32>,
}

impl ProgramRequest {
    /// Enforce the caller contract; the engine never runs on inputs that fail here.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.program_name.trim().is_empty() {
            return Err(InputError::MissingProgramName);
        }
        if !self.tuition_estimate.is_finite() || self.tuition_estimate < 0.0 {
            return Err(InputError::InvalidTuition(self.tuition_estimate));
        }
        if self.cohort_size == 0 {
            return Err(InputError::EmptyCohort);
        }
        if !self.total_seat_hours.is_finite() || self.total_seat_hours <= 0.0 {
            return Err(InputError::InvalidSeatHours(self.total_seat_hours));
        }
        if self.sections_per_year == 0 {
            return Err(InputError::NoSections);
        }
        if let Some(rate) = self.client_wage_override {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(InputError::InvalidWageOverride(rate));
            }
        }
        if self.client_cohort_override == Some(0) {
            return Err(InputError::EmptyCohortOverride);
        }
        Ok(())
    }
}

/// Caller contract violations detected before any projection runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("program name must not be empty")]
    MissingProgramName,
    #[error("tuition estimate must be a finite, non-negative amount (got {0})")]
    InvalidTuition(f64),
    #[error("cohort size must be greater than zero")]
    EmptyCohort,
    #[error("total seat hours must be a finite, positive number (got {0})")]
    InvalidSeatHours(f64),
    #[error("sections per year must be greater than zero")]
    NoSections,
    #[error("client wage override must be a finite, positive hourly rate (got {0})")]
    InvalidWageOverride(f64),
    #[error("client cohort override must be greater than zero")]
    EmptyCohortOverride,
}

/// Validated inputs with the instructional wage resolved; consumed by both cost models.
///
/// Under the continuing-education model `cohort_size` is read as students per section
/// and `total_seat_hours` as contact hours per section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInputs {
    pub program_name: String,
    pub tuition_estimate: f64,
    pub cohort_size: u32,
    pub total_seat_hours: f64,
    pub sections_per_year: u32,
    pub wage_rate: f64,
    pub annual_median_wage: f64,
    pub wage_source: String,
    pub has_existing_lab_space: bool,
    pub grant_eligible: bool,
    pub delivery_format: DeliveryFormat,
    pub region: Option<String>,
    pub client_wage_override: Option<f64>,
    pub client_cohort_override: Option<u32>,
}

impl ModelInputs {
    pub fn new(request: ProgramRequest, wage: WageEstimate) -> Self {
        let ProgramRequest {
            program_name,
            tuition_estimate,
            cohort_size,
            total_seat_hours,
            sections_per_year,
            has_existing_lab_space,
            grant_eligible,
            delivery_format,
            region,
            client_wage_override,
            client_cohort_override,
        } = request;

        Self {
            program_name,
            tuition_estimate,
            cohort_size,
            total_seat_hours,
            sections_per_year,
            wage_rate: wage.hourly_rate,
            annual_median_wage: wage.annual_median,
            wage_source: wage.source,
            has_existing_lab_space,
            grant_eligible,
            delivery_format,
            region,
            client_wage_override,
            client_cohort_override,
        }
    }

    pub fn effective_wage_rate(&self) -> f64 {
        self.client_wage_override.unwrap_or(self.wage_rate)
    }

    pub fn target_cohort(&self) -> u32 {
        self.client_cohort_override.unwrap_or(self.cohort_size)
    }
}

/// Enrollment assumption applied to the target cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Pessimistic,
    Base,
    Optimistic,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Pessimistic, Scenario::Base, Scenario::Optimistic];

    pub const fn label(self) -> &'static str {
        match self {
            Scenario::Pessimistic => "pessimistic",
            Scenario::Base => "base",
            Scenario::Optimistic => "optimistic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Revenue {
    pub tuition: f64,
    pub grant: f64,
    pub total: f64,
}

impl Revenue {
    pub fn new(tuition: f64, grant: f64) -> Self {
        Self {
            tuition,
            grant,
            total: tuition + grant,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Expenses {
    pub instructor_cost: f64,
    pub lab_setup: f64,
    pub lab_supplies: f64,
    pub coordinator_cost: f64,
    pub marketing: f64,
    pub regulatory: f64,
    pub admin_overhead: f64,
    pub total: f64,
}

/// Direct cost lines; overhead is applied on top by the calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectCosts {
    pub instructor_cost: f64,
    pub lab_setup: f64,
    pub lab_supplies: f64,
    pub coordinator_cost: f64,
    pub marketing: f64,
    pub regulatory: f64,
}

impl DirectCosts {
    pub fn sum(&self) -> f64 {
        self.instructor_cost
            + self.lab_setup
            + self.lab_supplies
            + self.coordinator_cost
            + self.marketing
            + self.regulatory
    }
}

impl Expenses {
    pub fn new(direct: DirectCosts, admin_overhead: f64) -> Self {
        Self {
            instructor_cost: direct.instructor_cost,
            lab_setup: direct.lab_setup,
            lab_supplies: direct.lab_supplies,
            coordinator_cost: direct.coordinator_cost,
            marketing: direct.marketing,
            regulatory: direct.regulatory,
            admin_overhead,
            total: direct.sum() + admin_overhead,
        }
    }

    pub fn direct_costs(&self) -> f64 {
        self.total - self.admin_overhead
    }
}

/// One projected year for one scenario branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyProjection {
    pub year: u8,
    pub scenario: Scenario,
    pub enrollment: u32,
    pub sections: u32,
    pub revenue: Revenue,
    pub expenses: Expenses,
    pub net_position: f64,
    pub margin: f64,
}

impl YearlyProjection {
    pub fn new(
        year: u8,
        scenario: Scenario,
        enrollment: u32,
        sections: u32,
        revenue: Revenue,
        expenses: Expenses,
    ) -> Self {
        let net_position = revenue.total - expenses.total;
        let margin = if revenue.total > 0.0 {
            net_position / revenue.total
        } else {
            0.0
        };

        Self {
            year,
            scenario,
            enrollment,
            sections,
            revenue,
            expenses,
            net_position,
            margin,
        }
    }
}

/// Three-year projections for every scenario branch, indexed `[year 1, year 2, year 3]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub pessimistic: [YearlyProjection; 3],
    pub base: [YearlyProjection; 3],
    pub optimistic: [YearlyProjection; 3],
}

impl ScenarioSet {
    pub fn branch(&self, scenario: Scenario) -> &[YearlyProjection; 3] {
        match scenario {
            Scenario::Pessimistic => &self.pessimistic,
            Scenario::Base => &self.base,
            Scenario::Optimistic => &self.optimistic,
        }
    }

    pub fn year(&self, scenario: Scenario, year: u8) -> Option<&YearlyProjection> {
        let index = usize::from(year).checked_sub(1)?;
        self.branch(scenario).get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &YearlyProjection> {
        self.pessimistic
            .iter()
            .chain(self.base.iter())
            .chain(self.optimistic.iter())
    }
}

/// Round `count × factor` to the nearest whole student.
pub(crate) fn scale_enrollment(count: u32, factor: f64) -> u32 {
    let scaled = (f64::from(count) * factor).round();
    if scaled <= 0.0 {
        0
    } else if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        scaled as u32
    }
}
