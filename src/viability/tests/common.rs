use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::viability::config::EngineConfig;
use crate::viability::domain::{DeliveryFormat, ModelInputs, ProgramRequest};
use crate::viability::engine::ViabilityEngine;
use crate::viability::wages::{WageService, WageServiceError};

type Lookup = (String, Option<String>);

/// Wage service answering from a fixed table and recording every lookup.
/// Unscripted lookups report the service as unavailable.
#[derive(Clone, Default)]
pub(super) struct ScriptedWageService {
    responses: HashMap<Lookup, Result<f64, WageServiceError>>,
    calls: Arc<Mutex<Vec<Lookup>>>,
}

impl ScriptedWageService {
    pub(super) fn national(mut self, occupation_code: &str, annual: f64) -> Self {
        self.responses
            .insert((occupation_code.to_string(), None), Ok(annual));
        self
    }

    pub(super) fn regional(mut self, occupation_code: &str, region: &str, annual: f64) -> Self {
        self.responses.insert(
            (occupation_code.to_string(), Some(region.to_string())),
            Ok(annual),
        );
        self
    }

    pub(super) fn failing(
        mut self,
        occupation_code: &str,
        region: Option<&str>,
        error: WageServiceError,
    ) -> Self {
        self.responses.insert(
            (occupation_code.to_string(), region.map(str::to_string)),
            Err(error),
        );
        self
    }

    pub(super) fn calls(&self) -> Vec<Lookup> {
        self.calls.lock().expect("call log poisoned").clone()
    }
}

impl WageService for ScriptedWageService {
    async fn median_annual_wage(
        &self,
        occupation_code: &str,
        region: Option<&str>,
    ) -> Result<f64, WageServiceError> {
        let key = (occupation_code.to_string(), region.map(str::to_string));
        self.calls
            .lock()
            .expect("call log poisoned")
            .push(key.clone());
        self.responses
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Err(WageServiceError::Unavailable("not scripted".to_string())))
    }
}

/// Health-specialties national median that resolves to exactly $30.00/h.
pub(super) const THIRTY_DOLLAR_MEDIAN: f64 = 62_400.0;

pub(super) fn full_program_request() -> ProgramRequest {
    ProgramRequest {
        program_name: "Dental Assisting".to_string(),
        tuition_estimate: 3_000.0,
        cohort_size: 20,
        total_seat_hours: 400.0,
        sections_per_year: 2,
        has_existing_lab_space: false,
        grant_eligible: true,
        delivery_format: DeliveryFormat::InPerson,
        region: None,
        client_wage_override: None,
        client_cohort_override: None,
    }
}

pub(super) fn ceu_request() -> ProgramRequest {
    ProgramRequest {
        program_name: "Welding Safety Refresher".to_string(),
        tuition_estimate: 155.0,
        cohort_size: 25,
        total_seat_hours: 6.0,
        sections_per_year: 8,
        has_existing_lab_space: true,
        grant_eligible: false,
        delivery_format: DeliveryFormat::InPerson,
        region: None,
        client_wage_override: None,
        client_cohort_override: None,
    }
}

pub(super) fn full_program_inputs() -> ModelInputs {
    ModelInputs {
        program_name: "Dental Assisting".to_string(),
        tuition_estimate: 3_000.0,
        cohort_size: 20,
        total_seat_hours: 400.0,
        sections_per_year: 2,
        wage_rate: 30.0,
        annual_median_wage: THIRTY_DOLLAR_MEDIAN,
        wage_source: "Occupation wage service national median, SOC 25-1071".to_string(),
        has_existing_lab_space: false,
        grant_eligible: true,
        delivery_format: DeliveryFormat::InPerson,
        region: None,
        client_wage_override: None,
        client_cohort_override: None,
    }
}

pub(super) fn ceu_inputs() -> ModelInputs {
    ModelInputs {
        program_name: "Welding Safety Refresher".to_string(),
        tuition_estimate: 155.0,
        cohort_size: 25,
        total_seat_hours: 6.0,
        sections_per_year: 8,
        wage_rate: 31.16,
        annual_median_wage: 64_810.0,
        wage_source: "Last-known national median (compiled-in), SOC 25-1194".to_string(),
        has_existing_lab_space: true,
        grant_eligible: false,
        delivery_format: DeliveryFormat::InPerson,
        region: None,
        client_wage_override: None,
        client_cohort_override: None,
    }
}

pub(super) fn health_service() -> ScriptedWageService {
    ScriptedWageService::default().national("25-1071", THIRTY_DOLLAR_MEDIAN)
}

pub(super) fn engine(service: ScriptedWageService) -> Arc<ViabilityEngine<ScriptedWageService>> {
    Arc::new(ViabilityEngine::new(EngineConfig::standard(), service))
}

pub(super) fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} (+/- {tolerance}), got {actual}"
    );
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
