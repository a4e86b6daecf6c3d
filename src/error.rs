use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::viability::benchmarks::UnknownBenchmark;
use crate::viability::{EngineConfigError, InputError, ManifestExportError, WageServiceError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    EngineConfig(EngineConfigError),
    WageService(WageServiceError),
    Input(InputError),
    Json(serde_json::Error),
    Benchmark(UnknownBenchmark),
    Export(ManifestExportError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::EngineConfig(err) => write!(f, "engine configuration error: {}", err),
            AppError::WageService(err) => write!(f, "wage service error: {}", err),
            AppError::Input(err) => write!(f, "invalid program input: {}", err),
            AppError::Json(err) => write!(f, "invalid JSON document: {}", err),
            AppError::Benchmark(err) => write!(f, "benchmark lookup failed: {}", err),
            AppError::Export(err) => write!(f, "manifest export failed: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::EngineConfig(err) => Some(err),
            AppError::WageService(err) => Some(err),
            AppError::Input(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Benchmark(err) => Some(err),
            AppError::Export(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Input(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            AppError::Benchmark(_) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::EngineConfig(_)
            | AppError::WageService(_)
            | AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<EngineConfigError> for AppError {
    fn from(value: EngineConfigError) -> Self {
        Self::EngineConfig(value)
    }
}

impl From<WageServiceError> for AppError {
    fn from(value: WageServiceError) -> Self {
        Self::WageService(value)
    }
}

impl From<InputError> for AppError {
    fn from(value: InputError) -> Self {
        Self::Input(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<UnknownBenchmark> for AppError {
    fn from(value: UnknownBenchmark) -> Self {
        Self::Benchmark(value)
    }
}

impl From<ManifestExportError> for AppError {
    fn from(value: ManifestExportError) -> Self {
        Self::Export(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_map_to_unprocessable_entity() {
        let response = AppError::from(InputError::EmptyCohort).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn unknown_benchmarks_map_to_not_found() {
        let response =
            AppError::from(UnknownBenchmark("lab_budget".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn wage_service_errors_are_internal() {
        let response = AppError::from(WageServiceError::Status(503)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
