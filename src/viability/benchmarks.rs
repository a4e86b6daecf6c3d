use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::format::currency;

/// A benchmark value paired with the citation it was taken from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cited<T> {
    pub value: T,
    pub source: String,
}

impl<T> Cited<T> {
    fn new(value: T, source: &str) -> Self {
        Self {
            value,
            source: source.to_string(),
        }
    }
}

/// Inclusive dollar range quoted by a benchmark source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRange {
    pub low: f64,
    pub high: f64,
}

impl CostRange {
    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

impl fmt::Display for CostRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", currency(self.low), currency(self.high))
    }
}

/// Instructional lab build-out tiers. The models price a new lab at the mid tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabSetupTiers {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

/// Flat cost lines used by the continuing-education cost structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CeuBenchmarks {
    pub materials_per_student: Cited<f64>,
    pub coordinator: Cited<f64>,
    pub marketing: Cited<f64>,
    pub regulatory: Cited<f64>,
}

impl CeuBenchmarks {
    /// Coordinator, marketing, and regulatory lines; charged every year.
    pub fn fixed_costs(&self) -> f64 {
        self.coordinator.value + self.marketing.value + self.regulatory.value
    }
}

/// Versioned reference constants behind every cost line in the projections.
///
/// The table is plain data: build it once (usually via [`CostBenchmarks::standard`]),
/// hand it to the engine, and share it freely across evaluations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBenchmarks {
    pub version: String,
    pub as_of: NaiveDate,
    pub lab_setup: Cited<LabSetupTiers>,
    pub supplies_per_student: Cited<f64>,
    pub coordinator_fraction: Cited<f64>,
    pub coordinator_salary: Cited<f64>,
    pub marketing_year_one: Cited<f64>,
    pub regulatory_fee: Cited<CostRange>,
    pub admin_overhead_pct: Cited<f64>,
    pub grant_award: Cited<CostRange>,
    pub ceu: CeuBenchmarks,
}

impl CostBenchmarks {
    pub fn standard() -> Self {
        Self {
            version: "2024.2".to_string(),
            as_of: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap_or_default(),
            lab_setup: Cited::new(
                LabSetupTiers {
                    low: 15_000.0,
                    mid: 30_000.0,
                    high: 50_000.0,
                },
                "Community college workforce lab build-out survey (equipment, furnishing, and installation by tier)",
            ),
            supplies_per_student: Cited::new(
                150.0,
                "Workforce program consumables budget per enrolled student",
            ),
            coordinator_fraction: Cited::new(
                0.25,
                "Coordinator time allocated to a single short-term program (0.25 FTE)",
            ),
            coordinator_salary: Cited::new(
                45_000.0,
                "Median postsecondary program coordinator salary",
            ),
            marketing_year_one: Cited::new(
                3_000.0,
                "Launch-year marketing budget for a new non-credit program",
            ),
            regulatory_fee: Cited::new(
                CostRange {
                    low: 500.0,
                    high: 3_000.0,
                },
                "State program approval and accreditation filing fee range",
            ),
            admin_overhead_pct: Cited::new(
                0.15,
                "Institutional indirect cost rate applied to direct program costs",
            ),
            grant_award: Cited::new(
                CostRange {
                    low: 6_000.0,
                    high: 30_000.0,
                },
                "State and federal workforce development grant award range",
            ),
            ceu: CeuBenchmarks {
                materials_per_student: Cited::new(
                    5.0,
                    "Continuing-education handout and certificate cost per participant",
                ),
                coordinator: Cited::new(
                    1_500.0,
                    "Annual coordinator stipend for a continuing-education offering",
                ),
                marketing: Cited::new(
                    800.0,
                    "Annual email and association listing spend for continuing-education courses",
                ),
                regulatory: Cited::new(
                    500.0,
                    "Annual CEU provider approval and renewal fees",
                ),
            },
        }
    }

    pub fn lab_setup_mid(&self) -> f64 {
        self.lab_setup.value.mid
    }

    pub fn coordinator_cost(&self) -> f64 {
        self.coordinator_fraction.value * self.coordinator_salary.value
    }

    pub fn regulatory_mid(&self) -> f64 {
        self.regulatory_fee.value.midpoint()
    }

    pub fn grant_mid(&self) -> f64 {
        self.grant_award.value.midpoint()
    }

    pub fn overhead_factor(&self) -> f64 {
        1.0 + self.admin_overhead_pct.value
    }

    pub fn get(&self, name: BenchmarkName) -> BenchmarkEntry {
        let (value, source) = match name {
            BenchmarkName::LabSetup => (
                BenchmarkValue::Tiers(self.lab_setup.value),
                &self.lab_setup.source,
            ),
            BenchmarkName::SuppliesPerStudent => (
                BenchmarkValue::Amount(self.supplies_per_student.value),
                &self.supplies_per_student.source,
            ),
            BenchmarkName::CoordinatorFraction => (
                BenchmarkValue::Fraction(self.coordinator_fraction.value),
                &self.coordinator_fraction.source,
            ),
            BenchmarkName::CoordinatorSalary => (
                BenchmarkValue::Amount(self.coordinator_salary.value),
                &self.coordinator_salary.source,
            ),
            BenchmarkName::MarketingYearOne => (
                BenchmarkValue::Amount(self.marketing_year_one.value),
                &self.marketing_year_one.source,
            ),
            BenchmarkName::RegulatoryFee => (
                BenchmarkValue::Range(self.regulatory_fee.value),
                &self.regulatory_fee.source,
            ),
            BenchmarkName::AdminOverheadPct => (
                BenchmarkValue::Fraction(self.admin_overhead_pct.value),
                &self.admin_overhead_pct.source,
            ),
            BenchmarkName::GrantAward => (
                BenchmarkValue::Range(self.grant_award.value),
                &self.grant_award.source,
            ),
            BenchmarkName::CeuMaterialsPerStudent => (
                BenchmarkValue::Amount(self.ceu.materials_per_student.value),
                &self.ceu.materials_per_student.source,
            ),
            BenchmarkName::CeuCoordinator => (
                BenchmarkValue::Amount(self.ceu.coordinator.value),
                &self.ceu.coordinator.source,
            ),
            BenchmarkName::CeuMarketing => (
                BenchmarkValue::Amount(self.ceu.marketing.value),
                &self.ceu.marketing.source,
            ),
            BenchmarkName::CeuRegulatory => (
                BenchmarkValue::Amount(self.ceu.regulatory.value),
                &self.ceu.regulatory.source,
            ),
        };

        BenchmarkEntry {
            name,
            value,
            source: source.clone(),
        }
    }

    pub fn entries(&self) -> Vec<BenchmarkEntry> {
        BenchmarkName::ALL.iter().map(|name| self.get(*name)).collect()
    }

    /// First benchmark holding a negative or non-finite value, or an inverted range.
    pub fn first_invalid(&self) -> Option<BenchmarkName> {
        BenchmarkName::ALL
            .iter()
            .copied()
            .find(|name| !self.get(*name).value.is_sound())
    }
}

impl Default for CostBenchmarks {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkName {
    LabSetup,
    SuppliesPerStudent,
    CoordinatorFraction,
    CoordinatorSalary,
    MarketingYearOne,
    RegulatoryFee,
    AdminOverheadPct,
    GrantAward,
    CeuMaterialsPerStudent,
    CeuCoordinator,
    CeuMarketing,
    CeuRegulatory,
}

impl BenchmarkName {
    pub const ALL: [BenchmarkName; 12] = [
        BenchmarkName::LabSetup,
        BenchmarkName::SuppliesPerStudent,
        BenchmarkName::CoordinatorFraction,
        BenchmarkName::CoordinatorSalary,
        BenchmarkName::MarketingYearOne,
        BenchmarkName::RegulatoryFee,
        BenchmarkName::AdminOverheadPct,
        BenchmarkName::GrantAward,
        BenchmarkName::CeuMaterialsPerStudent,
        BenchmarkName::CeuCoordinator,
        BenchmarkName::CeuMarketing,
        BenchmarkName::CeuRegulatory,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            BenchmarkName::LabSetup => "lab_setup",
            BenchmarkName::SuppliesPerStudent => "supplies_per_student",
            BenchmarkName::CoordinatorFraction => "coordinator_fraction",
            BenchmarkName::CoordinatorSalary => "coordinator_salary",
            BenchmarkName::MarketingYearOne => "marketing_year_one",
            BenchmarkName::RegulatoryFee => "regulatory_fee",
            BenchmarkName::AdminOverheadPct => "admin_overhead_pct",
            BenchmarkName::GrantAward => "grant_award",
            BenchmarkName::CeuMaterialsPerStudent => "ceu_materials_per_student",
            BenchmarkName::CeuCoordinator => "ceu_coordinator",
            BenchmarkName::CeuMarketing => "ceu_marketing",
            BenchmarkName::CeuRegulatory => "ceu_regulatory",
        }
    }
}

impl FromStr for BenchmarkName {
    type Err = UnknownBenchmark;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        BenchmarkName::ALL
            .iter()
            .copied()
            .find(|name| name.key() == normalized)
            .ok_or_else(|| UnknownBenchmark(value.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown benchmark '{0}'")]
pub struct UnknownBenchmark(pub String);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BenchmarkValue {
    Amount(f64),
    Fraction(f64),
    Range(CostRange),
    Tiers(LabSetupTiers),
}

impl BenchmarkValue {
    fn is_sound(&self) -> bool {
        let amount = |value: f64| value.is_finite() && value >= 0.0;
        match self {
            BenchmarkValue::Amount(value) | BenchmarkValue::Fraction(value) => amount(*value),
            BenchmarkValue::Range(range) => {
                amount(range.low) && amount(range.high) && range.low <= range.high
            }
            BenchmarkValue::Tiers(tiers) => {
                amount(tiers.low)
                    && amount(tiers.high)
                    && tiers.low <= tiers.mid
                    && tiers.mid <= tiers.high
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkEntry {
    pub name: BenchmarkName,
    pub value: BenchmarkValue,
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_matches_reference_midpoints() {
        let benchmarks = CostBenchmarks::standard();
        assert_eq!(benchmarks.lab_setup_mid(), 30_000.0);
        assert_eq!(benchmarks.coordinator_cost(), 11_250.0);
        assert_eq!(benchmarks.regulatory_mid(), 1_750.0);
        assert_eq!(benchmarks.grant_mid(), 18_000.0);
        assert_eq!(benchmarks.ceu.fixed_costs(), 2_800.0);
    }

    #[test]
    fn every_entry_carries_a_citation() {
        let benchmarks = CostBenchmarks::standard();
        let entries = benchmarks.entries();
        assert_eq!(entries.len(), BenchmarkName::ALL.len());
        assert!(entries.iter().all(|entry| !entry.source.trim().is_empty()));
    }

    #[test]
    fn names_parse_from_keys() {
        let parsed: BenchmarkName = "Admin-Overhead-Pct".parse().expect("known benchmark");
        assert_eq!(parsed, BenchmarkName::AdminOverheadPct);
        assert!("lab_budget".parse::<BenchmarkName>().is_err());

        let entry = CostBenchmarks::standard().get(parsed);
        assert_eq!(entry.value, BenchmarkValue::Fraction(0.15));
    }

    #[test]
    fn standard_table_is_sound() {
        assert_eq!(CostBenchmarks::standard().first_invalid(), None);
    }

    #[test]
    fn flags_negative_and_inverted_values() {
        let mut benchmarks = CostBenchmarks::standard();
        benchmarks.admin_overhead_pct.value = -0.15;
        assert_eq!(
            benchmarks.first_invalid(),
            Some(BenchmarkName::AdminOverheadPct)
        );

        let mut benchmarks = CostBenchmarks::standard();
        benchmarks.grant_award.value = CostRange {
            low: 30_000.0,
            high: 6_000.0,
        };
        assert_eq!(benchmarks.first_invalid(), Some(BenchmarkName::GrantAward));

        let mut benchmarks = CostBenchmarks::standard();
        benchmarks.ceu.marketing.value = f64::NAN;
        assert_eq!(benchmarks.first_invalid(), Some(BenchmarkName::CeuMarketing));
    }
}
