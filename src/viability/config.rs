use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::benchmarks::{BenchmarkName, CostBenchmarks};
use super::scoring::ScoringPolicy;
use super::wages::{WagePolicyError, WageResolverPolicy};

/// Immutable configuration handed to the engine. Nothing in the engine mutates it,
/// so tests can swap in overridden benchmarks or rubric values freely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub benchmarks: CostBenchmarks,
    #[serde(default)]
    pub enrollment: EnrollmentAssumptions,
    #[serde(default)]
    pub scoring: ScoringPolicy,
    #[serde(default)]
    pub wages: WageResolverPolicy,
}

impl EngineConfig {
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, EngineConfigError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, EngineConfigError> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineConfigError> {
        if let Some(name) = self.benchmarks.first_invalid() {
            return Err(EngineConfigError::InvalidBenchmark(name));
        }
        self.enrollment.validate()?;
        self.wages.validate()?;
        Ok(())
    }
}

/// Enrollment fill rates and growth applied when building scenario branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrollmentAssumptions {
    pub pessimistic_fill: f64,
    pub base_fill: f64,
    pub optimistic_fill: f64,
    pub year_two_growth: f64,
    pub year_three_growth: f64,
    pub continuing_education: ContinuingEducationEnrollment,
}

/// Continuing-education volume assumptions, relative to planned sections × seats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuingEducationEnrollment {
    pub pessimistic_fill: f64,
    pub base_fill: f64,
    pub optimistic_fill: f64,
    pub annual_growth: f64,
}

impl EnrollmentAssumptions {
    pub fn standard() -> Self {
        Self {
            pessimistic_fill: 0.60,
            base_fill: 0.85,
            optimistic_fill: 1.00,
            year_two_growth: 0.20,
            year_three_growth: 0.15,
            continuing_education: ContinuingEducationEnrollment {
                pessimistic_fill: 0.60,
                base_fill: 1.00,
                optimistic_fill: 1.20,
                annual_growth: 0.10,
            },
        }
    }

    /// Fill rates must be ordered so pessimistic <= base <= optimistic holds in every year.
    pub fn validate(&self) -> Result<(), EngineConfigError> {
        let ceu = &self.continuing_education;
        let ordered = |low: f64, mid: f64, high: f64| 0.0 <= low && low <= mid && mid <= high;

        if !ordered(self.pessimistic_fill, self.base_fill, self.optimistic_fill)
            || !ordered(ceu.pessimistic_fill, ceu.base_fill, ceu.optimistic_fill)
        {
            return Err(EngineConfigError::UnorderedFillRates);
        }
        if self.year_two_growth < -1.0
            || self.year_three_growth < -1.0
            || ceu.annual_growth < -1.0
        {
            return Err(EngineConfigError::InvalidGrowth);
        }
        Ok(())
    }
}

impl Default for ContinuingEducationEnrollment {
    fn default() -> Self {
        EnrollmentAssumptions::standard().continuing_education
    }
}

impl Default for EnrollmentAssumptions {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineConfigError {
    #[error("unable to read engine config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid engine config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scenario fill rates must satisfy 0 <= pessimistic <= base <= optimistic")]
    UnorderedFillRates,
    #[error("growth rates must not be below -100%")]
    InvalidGrowth,
    #[error("benchmark '{}' must be finite and non-negative, with low <= high", .0.key())]
    InvalidBenchmark(BenchmarkName),
    #[error("invalid wage policy: {0}")]
    WagePolicy(#[from] WagePolicyError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn partial_json_falls_back_to_standard_sections() {
        let json = r#"{
            "scoring": {
                "min_score": 1,
                "max_score": 10,
                "full_program": {
                    "long_run_margin_threshold": 0.25,
                    "long_run_margin_points": 3,
                    "break_even_cohort_fraction": 0.6,
                    "break_even_points": 2,
                    "grant_offset_fraction": 0.5,
                    "grant_offset_points": 1,
                    "second_year_points": 2,
                    "launch_loss_threshold": 10000.0,
                    "launch_loss_points": 1,
                    "lean_delivery_points": 1
                },
                "continuing_education": {
                    "ceiling": 10,
                    "margin_floor": 0.5,
                    "margin_penalty": 3,
                    "minimum_net_position": 5000.0,
                    "net_position_penalty": 2,
                    "max_break_even_per_section": 15,
                    "break_even_penalty": 2
                }
            }
        }"#;

        let config = EngineConfig::from_reader(Cursor::new(json)).expect("config parses");
        assert_eq!(config.scoring.full_program.launch_loss_threshold, 10_000.0);
        assert_eq!(config.benchmarks, CostBenchmarks::standard());
        assert_eq!(config.enrollment, EnrollmentAssumptions::standard());
    }

    #[test]
    fn partial_enrollment_keeps_remaining_defaults() {
        let json = r#"{"enrollment": {"base_fill": 0.9, "continuing_education": {"annual_growth": 0.05}}}"#;
        let config = EngineConfig::from_reader(Cursor::new(json)).expect("config parses");
        assert_eq!(config.enrollment.base_fill, 0.9);
        assert_eq!(config.enrollment.year_two_growth, 0.20);
        assert_eq!(config.enrollment.continuing_education.annual_growth, 0.05);
        assert_eq!(config.enrollment.continuing_education.optimistic_fill, 1.20);
    }

    #[test]
    fn rejects_unordered_fill_rates() {
        let mut enrollment = EnrollmentAssumptions::standard();
        enrollment.pessimistic_fill = 0.9;
        assert!(matches!(
            enrollment.validate(),
            Err(EngineConfigError::UnorderedFillRates)
        ));
    }

    #[test]
    fn standard_config_round_trips_through_json() {
        let json = serde_json::to_string(&EngineConfig::standard()).expect("serializes");
        let parsed = EngineConfig::from_reader(Cursor::new(json)).expect("parses");
        assert_eq!(parsed, EngineConfig::standard());
    }

    #[test]
    fn rejects_zero_annual_hours() {
        let json = r#"{"wages": {"sanity_floor": 20000.0, "sanity_ceiling": 500000.0, "annual_hours": 0}}"#;
        let result = EngineConfig::from_reader(Cursor::new(json));
        assert!(matches!(
            result,
            Err(EngineConfigError::WagePolicy(WagePolicyError::AnnualHours(_)))
        ));
    }

    #[test]
    fn rejects_inverted_sanity_band() {
        let json = r#"{"wages": {"sanity_floor": 90000.0, "sanity_ceiling": 40000.0, "annual_hours": 2080}}"#;
        let result = EngineConfig::from_reader(Cursor::new(json));
        assert!(matches!(
            result,
            Err(EngineConfigError::WagePolicy(WagePolicyError::SanityBand { .. }))
        ));
    }

    #[test]
    fn rejects_negative_overhead_benchmark() {
        let mut config = EngineConfig::standard();
        config.benchmarks.admin_overhead_pct.value = -0.15;
        let json = serde_json::to_string(&config).expect("serializes");

        let result = EngineConfig::from_reader(Cursor::new(json));
        assert!(matches!(
            result,
            Err(EngineConfigError::InvalidBenchmark(BenchmarkName::AdminOverheadPct))
        ));
    }

    #[test]
    fn rejects_inverted_regulatory_range() {
        let mut config = EngineConfig::standard();
        config.benchmarks.regulatory_fee.value.low = 5_000.0;
        config.benchmarks.regulatory_fee.value.high = 500.0;

        let error = config.validate().expect_err("inverted range rejected");
        assert!(error.to_string().contains("regulatory_fee"));
    }
}
