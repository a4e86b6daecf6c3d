use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use program_viability::config::AppConfig;
use program_viability::error::AppError;
use program_viability::telemetry;
use program_viability::viability::{
    viability_router, BenchmarkName, EngineConfig, ProgramRequest, ProgramType, ViabilityBundle,
    ViabilityEngine, WageBackend,
};
use serde_json::json;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "program-viability",
    about = "Project profit/loss, break-even enrollment, and a viability score for short-term education programs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Evaluate a single program described by a JSON file
    Evaluate(EvaluateArgs),
    /// Print the cost benchmark table
    Benchmarks(BenchmarksArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// JSON file holding the program parameters
    #[arg(long)]
    input: PathBuf,
    /// Classification from the program-type classifier
    /// (initial_licensure, continuing_education, non_licensed, unclear)
    #[arg(long, default_value = "unclear")]
    program_type: String,
    /// Also write the assumption manifest to this CSV file
    #[arg(long)]
    manifest_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BenchmarksArgs {
    /// Print a single benchmark (for example `admin_overhead_pct`)
    #[arg(long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Evaluate(args) => run_evaluation(args).await,
        Command::Benchmarks(args) => run_benchmarks(args),
    }
}

fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig, AppError> {
    match path {
        Some(path) => Ok(EngineConfig::from_path(path)?),
        None => Ok(EngineConfig::standard()),
    }
}

fn build_engine(config: &AppConfig) -> Result<ViabilityEngine<WageBackend>, AppError> {
    let engine_config = load_engine_config(config.engine_config_path.as_deref())?;
    let backend = WageBackend::from_config(&config.wages)?;
    Ok(ViabilityEngine::new(engine_config, backend))
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let engine = Arc::new(build_engine(&config)?);
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let operations = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state);

    let app = operations
        .merge(viability_router(engine))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        wage_service = config.wages.base_url.as_deref().unwrap_or("offline"),
        "program viability engine ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_evaluation(args: EvaluateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let EvaluateArgs {
        input,
        program_type,
        manifest_csv,
    } = args;

    let request: ProgramRequest = serde_json::from_reader(File::open(&input)?)?;
    let program_type = ProgramType::from_classification(&program_type);
    let engine = build_engine(&config)?;
    let bundle = engine.evaluate(request, program_type).await?;

    if let Some(path) = manifest_csv {
        let writer = BufWriter::new(File::create(&path)?);
        bundle.assumptions.write_csv(writer)?;
        info!(path = %path.display(), rows = bundle.assumptions.len(), "wrote assumption manifest");
    }

    render_bundle(&bundle)?;
    Ok(())
}

fn render_bundle(bundle: &ViabilityBundle) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(bundle)?;
    println!("{rendered}");
    Ok(())
}

fn run_benchmarks(args: BenchmarksArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine_config = load_engine_config(config.engine_config_path.as_deref())?;
    let benchmarks = &engine_config.benchmarks;

    let rendered = match args.name {
        Some(name) => {
            let name: BenchmarkName = name.parse()?;
            serde_json::to_string_pretty(&benchmarks.get(name))?
        }
        None => serde_json::to_string_pretty(&json!({
            "version": benchmarks.version,
            "as_of": benchmarks.as_of,
            "entries": benchmarks.entries(),
        }))?,
    };

    println!("{rendered}");
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
