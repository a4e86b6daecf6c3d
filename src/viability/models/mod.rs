mod ceu;
mod full;

pub use ceu::CeuModel;
pub use full::FullProgramModel;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::break_even::{BreakEven, EnrollmentBasis};
use super::config::EngineConfig;
use super::domain::{ModelInputs, ProgramType, ScenarioSet};
use super::scoring::ViabilityAssessment;

/// Cost structure chosen for a program. Continuing-education programs run the
/// short-form per-section model; every other classification runs the full model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostModel {
    FullProgram,
    ContinuingEducation,
}

impl CostModel {
    pub fn route(program_type: ProgramType) -> Self {
        let model = match program_type {
            ProgramType::ContinuingEducation => CostModel::ContinuingEducation,
            ProgramType::InitialLicensure | ProgramType::NonLicensed | ProgramType::Unclear => {
                CostModel::FullProgram
            }
        };
        debug!(program_type = program_type.label(), model = model.label(), "routed cost model");
        model
    }

    pub const fn label(self) -> &'static str {
        match self {
            CostModel::FullProgram => "full_program",
            CostModel::ContinuingEducation => "continuing_education",
        }
    }

    pub fn run(self, inputs: &ModelInputs, config: &EngineConfig) -> ModelOutcome {
        match self {
            CostModel::FullProgram => FullProgramModel::new(config).run(inputs),
            CostModel::ContinuingEducation => CeuModel::new(config).run(inputs),
        }
    }
}

/// Output shared by both cost models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOutcome {
    pub scenarios: ScenarioSet,
    pub break_even: BreakEven,
    pub break_even_basis: EnrollmentBasis,
    pub viability: ViabilityAssessment,
    pub grant_impact_summary: String,
}
