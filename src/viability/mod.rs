//! Financial viability engine for short-term education programs.
//!
//! A request is validated, the instructional wage is resolved through a tiered
//! fallback chain, and the program classification selects one of two cost models.
//! Each model produces three-year projections for three enrollment scenarios, an
//! algebraic break-even enrollment, and a 1-10 score with a rule-by-rule rationale.
//! Every number that fed the result is listed in the assumption manifest.

pub mod benchmarks;
pub mod break_even;
pub mod config;
pub mod domain;
pub mod engine;
mod format;
pub mod manifest;
pub mod models;
pub mod projection;
pub mod router;
pub mod scoring;
pub mod wages;

#[cfg(test)]
mod tests;

pub use benchmarks::{BenchmarkEntry, BenchmarkName, BenchmarkValue, CostBenchmarks};
pub use break_even::{BreakEven, BreakEvenTerms, EnrollmentBasis};
pub use config::{EngineConfig, EngineConfigError, EnrollmentAssumptions};
pub use domain::{
    DeliveryFormat, InputError, ModelInputs, ProgramRequest, ProgramType, Scenario, ScenarioSet,
    YearlyProjection,
};
pub use engine::{evaluate_inputs, ViabilityBundle, ViabilityEngine};
pub use manifest::{AssumptionEntry, AssumptionManifest, ManifestExportError, ManifestValue};
pub use models::{CostModel, ModelOutcome};
pub use router::viability_router;
pub use scoring::{RuleOutcome, ScoringPolicy, ViabilityAssessment, ViabilityRule};
pub use wages::{
    HttpWageService, OfflineWageService, WagePolicyError, WageBackend, WageEstimate,
    WageResolver, WageResolverPolicy, WageService, WageServiceError,
};
