use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};

use super::config::EngineConfig;
use super::domain::ModelInputs;
use super::format::{currency, percent};
use super::models::CostModel;

const CALLER_SOURCE: &str = "Caller-supplied program parameters";
const SCENARIO_SOURCE: &str = "Engine enrollment assumption (not a demand forecast)";

/// Typed value so downstream renderers can format each row appropriately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ManifestValue {
    Currency(f64),
    Count(u32),
    Hours(f64),
    Percent(f64),
    Flag(bool),
    Text(String),
}

impl fmt::Display for ManifestValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestValue::Currency(amount) if amount.fract().abs() > f64::EPSILON => {
                write!(f, "${amount:.2}")
            }
            ManifestValue::Currency(amount) => f.write_str(&currency(*amount)),
            ManifestValue::Count(count) => write!(f, "{count}"),
            ManifestValue::Hours(hours) => write!(f, "{hours} h"),
            ManifestValue::Percent(fraction) => f.write_str(&percent(*fraction)),
            ManifestValue::Flag(flag) => f.write_str(if *flag { "yes" } else { "no" }),
            ManifestValue::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionEntry {
    pub item: String,
    pub value: ManifestValue,
    pub source: String,
}

/// Ordered audit trail of every input and benchmark behind a set of projections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssumptionManifest {
    entries: Vec<AssumptionEntry>,
}

impl AssumptionManifest {
    pub fn entries(&self) -> &[AssumptionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, item: &str) -> Option<&AssumptionEntry> {
        self.entries.iter().find(|entry| entry.item == item)
    }

    /// Write `item,value,source` rows with a header.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ManifestExportError> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["item", "value", "source"])?;
        for entry in &self.entries {
            csv.write_record([
                entry.item.as_str(),
                entry.value.to_string().as_str(),
                entry.source.as_str(),
            ])?;
        }
        csv.flush()?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestExportError {
    #[error("failed to encode manifest CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write manifest: {0}")]
    Io(#[from] std::io::Error),
}

/// Collects one row per value that fed the chosen model, in a fixed review order:
/// caller inputs, resolved wage, enrollment assumptions, then benchmarks.
pub struct AssumptionManifestBuilder<'a> {
    config: &'a EngineConfig,
    entries: Vec<AssumptionEntry>,
}

impl<'a> AssumptionManifestBuilder<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
        }
    }

    pub fn build(mut self, inputs: &ModelInputs, model: CostModel) -> AssumptionManifest {
        match model {
            CostModel::FullProgram => self.full_program(inputs),
            CostModel::ContinuingEducation => self.continuing_education(inputs),
        }
        AssumptionManifest {
            entries: self.entries,
        }
    }

    fn record(&mut self, item: &str, value: ManifestValue, source: impl Into<String>) {
        debug_assert!(
            self.entries.iter().all(|entry| entry.item != item),
            "manifest item recorded twice: {item}"
        );
        self.entries.push(AssumptionEntry {
            item: item.to_string(),
            value,
            source: source.into(),
        });
    }

    fn full_program(&mut self, inputs: &ModelInputs) {
        let benchmarks = &self.config.benchmarks;
        let enrollment = &self.config.enrollment;

        self.program_identity(inputs);
        self.record(
            "Tuition per student",
            ManifestValue::Currency(inputs.tuition_estimate),
            CALLER_SOURCE,
        );
        self.cohort(inputs, "Target cohort size");
        self.record(
            "Total seat hours",
            ManifestValue::Hours(inputs.total_seat_hours),
            CALLER_SOURCE,
        );
        self.record(
            "Sections per year",
            ManifestValue::Count(inputs.sections_per_year),
            CALLER_SOURCE,
        );
        self.wage(inputs);
        self.record(
            "Existing lab space",
            ManifestValue::Flag(inputs.has_existing_lab_space),
            CALLER_SOURCE,
        );
        self.record(
            "Grant eligible",
            ManifestValue::Flag(inputs.grant_eligible),
            CALLER_SOURCE,
        );

        self.record(
            "Pessimistic enrollment fill",
            ManifestValue::Percent(enrollment.pessimistic_fill),
            SCENARIO_SOURCE,
        );
        self.record(
            "Base enrollment fill",
            ManifestValue::Percent(enrollment.base_fill),
            SCENARIO_SOURCE,
        );
        self.record(
            "Optimistic enrollment fill",
            ManifestValue::Percent(enrollment.optimistic_fill),
            SCENARIO_SOURCE,
        );
        self.record(
            "Year-2 enrollment growth",
            ManifestValue::Percent(enrollment.year_two_growth),
            SCENARIO_SOURCE,
        );
        self.record(
            "Year-3 enrollment growth",
            ManifestValue::Percent(enrollment.year_three_growth),
            SCENARIO_SOURCE,
        );

        let tiers = benchmarks.lab_setup.value;
        if inputs.has_existing_lab_space {
            self.record(
                "Lab setup cost (year 1)",
                ManifestValue::Currency(0.0),
                "Existing lab space; build-out benchmark not applied",
            );
        } else {
            self.record(
                "Lab setup cost (year 1)",
                ManifestValue::Currency(tiers.mid),
                format!(
                    "{} (mid tier; tiers {} / {} / {})",
                    benchmarks.lab_setup.source,
                    currency(tiers.low),
                    currency(tiers.mid),
                    currency(tiers.high)
                ),
            );
        }
        self.record(
            "Lab supplies per student",
            ManifestValue::Currency(benchmarks.supplies_per_student.value),
            benchmarks.supplies_per_student.source.clone(),
        );
        self.record(
            "Coordinator FTE fraction",
            ManifestValue::Percent(benchmarks.coordinator_fraction.value),
            benchmarks.coordinator_fraction.source.clone(),
        );
        self.record(
            "Coordinator salary",
            ManifestValue::Currency(benchmarks.coordinator_salary.value),
            benchmarks.coordinator_salary.source.clone(),
        );
        self.record(
            "Launch marketing budget (year 1)",
            ManifestValue::Currency(benchmarks.marketing_year_one.value),
            benchmarks.marketing_year_one.source.clone(),
        );
        self.record(
            "Regulatory fees",
            ManifestValue::Currency(benchmarks.regulatory_mid()),
            format!(
                "{} (midpoint of {})",
                benchmarks.regulatory_fee.source, benchmarks.regulatory_fee.value
            ),
        );
        self.record(
            "Administrative overhead rate",
            ManifestValue::Percent(benchmarks.admin_overhead_pct.value),
            benchmarks.admin_overhead_pct.source.clone(),
        );
        if inputs.grant_eligible {
            self.record(
                "Grant award (annual)",
                ManifestValue::Currency(benchmarks.grant_mid()),
                format!(
                    "{} (midpoint of {})",
                    benchmarks.grant_award.source, benchmarks.grant_award.value
                ),
            );
        } else {
            self.record(
                "Grant award (annual)",
                ManifestValue::Currency(0.0),
                "Not grant-eligible; no grant revenue projected",
            );
        }
    }

    fn continuing_education(&mut self, inputs: &ModelInputs) {
        let ceu = &self.config.benchmarks.ceu;
        let enrollment = &self.config.enrollment.continuing_education;

        self.program_identity(inputs);
        self.record(
            "Tuition per participant",
            ManifestValue::Currency(inputs.tuition_estimate),
            CALLER_SOURCE,
        );
        self.cohort(inputs, "Students per section");
        self.record(
            "Contact hours per section",
            ManifestValue::Hours(inputs.total_seat_hours),
            CALLER_SOURCE,
        );
        self.record(
            "Sections per year",
            ManifestValue::Count(inputs.sections_per_year),
            CALLER_SOURCE,
        );
        self.wage(inputs);

        self.record(
            "Pessimistic section fill",
            ManifestValue::Percent(enrollment.pessimistic_fill),
            SCENARIO_SOURCE,
        );
        self.record(
            "Base section fill",
            ManifestValue::Percent(enrollment.base_fill),
            SCENARIO_SOURCE,
        );
        self.record(
            "Optimistic section fill",
            ManifestValue::Percent(enrollment.optimistic_fill),
            SCENARIO_SOURCE,
        );
        self.record(
            "Annual enrollment growth",
            ManifestValue::Percent(enrollment.annual_growth),
            "Engine word-of-mouth growth assumption; sections recomputed to match",
        );

        self.record(
            "Materials per participant",
            ManifestValue::Currency(ceu.materials_per_student.value),
            ceu.materials_per_student.source.clone(),
        );
        self.record(
            "Coordinator cost (annual)",
            ManifestValue::Currency(ceu.coordinator.value),
            ceu.coordinator.source.clone(),
        );
        self.record(
            "Marketing cost (annual)",
            ManifestValue::Currency(ceu.marketing.value),
            ceu.marketing.source.clone(),
        );
        self.record(
            "Regulatory fees (annual)",
            ManifestValue::Currency(ceu.regulatory.value),
            ceu.regulatory.source.clone(),
        );
    }

    fn program_identity(&mut self, inputs: &ModelInputs) {
        self.record(
            "Program",
            ManifestValue::Text(inputs.program_name.clone()),
            CALLER_SOURCE,
        );
        self.record(
            "Delivery format",
            ManifestValue::Text(inputs.delivery_format.label().to_string()),
            CALLER_SOURCE,
        );
        self.record(
            "Region",
            ManifestValue::Text(
                inputs
                    .region
                    .clone()
                    .unwrap_or_else(|| "national".to_string()),
            ),
            CALLER_SOURCE,
        );
    }

    fn cohort(&mut self, inputs: &ModelInputs, item: &str) {
        match inputs.client_cohort_override {
            Some(cohort) => self.record(
                item,
                ManifestValue::Count(cohort),
                format!(
                    "Client override (supersedes requested {})",
                    inputs.cohort_size
                ),
            ),
            None => self.record(item, ManifestValue::Count(inputs.cohort_size), CALLER_SOURCE),
        }
    }

    fn wage(&mut self, inputs: &ModelInputs) {
        match inputs.client_wage_override {
            Some(rate) => self.record(
                "Instructor hourly rate",
                ManifestValue::Currency(rate),
                format!(
                    "Client override (supersedes ${:.2}/h from {})",
                    inputs.wage_rate, inputs.wage_source
                ),
            ),
            None => {
                self.record(
                    "Instructor hourly rate",
                    ManifestValue::Currency(inputs.wage_rate),
                    format!(
                        "{} (annual median / {} h)",
                        inputs.wage_source, self.config.wages.annual_hours
                    ),
                );
                self.record(
                    "Instructor annual median wage",
                    ManifestValue::Currency(inputs.annual_median_wage),
                    inputs.wage_source.clone(),
                );
            }
        }
    }
}
