use serde::{Deserialize, Serialize};
use tracing::info;

use super::break_even::{BreakEven, EnrollmentBasis};
use super::config::EngineConfig;
use super::domain::{InputError, ModelInputs, ProgramRequest, ProgramType, ScenarioSet};
use super::manifest::{AssumptionManifest, AssumptionManifestBuilder};
use super::models::CostModel;
use super::scoring::ViabilityAssessment;
use super::wages::{WageResolver, WageService};

/// Everything one evaluation produces, handed to downstream report writers as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViabilityBundle {
    pub program_name: String,
    pub program_type: ProgramType,
    pub model: CostModel,
    pub benchmark_version: String,
    pub assumptions: AssumptionManifest,
    pub scenarios: ScenarioSet,
    pub break_even_enrollment: u32,
    pub break_even: BreakEven,
    pub break_even_basis: EnrollmentBasis,
    pub viability: ViabilityAssessment,
    pub grant_impact_summary: String,
}

/// Entry point: validates a request, resolves the instructional wage, and runs the
/// cost model selected by the program classification.
pub struct ViabilityEngine<S> {
    config: EngineConfig,
    resolver: WageResolver<S>,
}

impl<S> ViabilityEngine<S>
where
    S: WageService,
{
    pub fn new(config: EngineConfig, service: S) -> Self {
        let resolver = WageResolver::new(service, config.wages);
        Self { config, resolver }
    }

    pub fn with_resolver(config: EngineConfig, resolver: WageResolver<S>) -> Self {
        Self { config, resolver }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn resolver(&self) -> &WageResolver<S> {
        &self.resolver
    }

    pub async fn evaluate(
        &self,
        request: ProgramRequest,
        program_type: ProgramType,
    ) -> Result<ViabilityBundle, InputError> {
        request.validate()?;

        let wage = self
            .resolver
            .resolve(&request.program_name, request.region.as_deref())
            .await;
        let inputs = ModelInputs::new(request, wage);
        let bundle = evaluate_inputs(&inputs, program_type, &self.config);

        info!(
            program = %bundle.program_name,
            model = bundle.model.label(),
            score = bundle.viability.score,
            break_even = bundle.break_even_enrollment,
            wage_source = %inputs.wage_source,
            "program evaluated"
        );
        Ok(bundle)
    }
}

/// Deterministic half of an evaluation, for callers that already hold resolved inputs.
pub fn evaluate_inputs(
    inputs: &ModelInputs,
    program_type: ProgramType,
    config: &EngineConfig,
) -> ViabilityBundle {
    let model = CostModel::route(program_type);
    let outcome = model.run(inputs, config);
    let assumptions = AssumptionManifestBuilder::new(config).build(inputs, model);

    ViabilityBundle {
        program_name: inputs.program_name.clone(),
        program_type,
        model,
        benchmark_version: config.benchmarks.version.clone(),
        assumptions,
        scenarios: outcome.scenarios,
        break_even_enrollment: outcome.break_even.enrollment(),
        break_even: outcome.break_even,
        break_even_basis: outcome.break_even_basis,
        viability: outcome.viability,
        grant_impact_summary: outcome.grant_impact_summary,
    }
}
