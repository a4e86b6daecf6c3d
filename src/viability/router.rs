use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::benchmarks::{BenchmarkEntry, BenchmarkName};
use super::domain::{ProgramRequest, ProgramType};
use super::engine::{ViabilityBundle, ViabilityEngine};
use super::wages::WageService;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    /// Classifier output; unrecognised values are treated as `unclear`.
    pub program_type: String,
    pub program: ProgramRequest,
}

/// Router exposing program evaluation and the benchmark table.
pub fn viability_router<S>(engine: Arc<ViabilityEngine<S>>) -> Router
where
    S: WageService + 'static,
{
    Router::new()
        .route("/api/v1/programs/evaluate", post(evaluate_handler::<S>))
        .route("/api/v1/benchmarks", get(benchmarks_handler::<S>))
        .route("/api/v1/benchmarks/:name", get(benchmark_handler::<S>))
        .with_state(engine)
}

pub(crate) async fn evaluate_handler<S>(
    State(engine): State<Arc<ViabilityEngine<S>>>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<ViabilityBundle>, AppError>
where
    S: WageService + 'static,
{
    let program_type = ProgramType::from_classification(&request.program_type);
    let bundle = engine.evaluate(request.program, program_type).await?;
    Ok(Json(bundle))
}

pub(crate) async fn benchmarks_handler<S>(
    State(engine): State<Arc<ViabilityEngine<S>>>,
) -> Json<serde_json::Value>
where
    S: WageService + 'static,
{
    let benchmarks = &engine.config().benchmarks;
    Json(json!({
        "version": benchmarks.version,
        "as_of": benchmarks.as_of,
        "entries": benchmarks.entries(),
    }))
}

pub(crate) async fn benchmark_handler<S>(
    State(engine): State<Arc<ViabilityEngine<S>>>,
    Path(name): Path<String>,
) -> Result<Json<BenchmarkEntry>, AppError>
where
    S: WageService + 'static,
{
    let name: BenchmarkName = name.parse()?;
    Ok(Json(engine.config().benchmarks.get(name)))
}
