use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use program_viability::viability::{
    viability_router, EngineConfig, OfflineWageService, ViabilityEngine,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> axum::Router {
    let engine = ViabilityEngine::new(EngineConfig::standard(), OfflineWageService);
    viability_router(Arc::new(engine))
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn evaluates_program_posted_as_json() {
    let payload = json!({
        "program_type": "non_licensed",
        "program": {
            "program_name": "Bookkeeping Essentials",
            "tuition_estimate": 2400.0,
            "cohort_size": 18,
            "total_seat_hours": 120.0,
            "delivery_format": "online",
            "region": "OH"
        }
    });

    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/programs/evaluate")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["program_name"], "Bookkeeping Essentials");
    assert_eq!(body["break_even_basis"], "per_cohort");

    let score = body["viability"]["score"].as_u64().expect("score");
    assert!((1..=10).contains(&score));

    for scenario in ["pessimistic", "base", "optimistic"] {
        assert_eq!(body["scenarios"][scenario].as_array().map(Vec::len), Some(3));
    }
}

#[tokio::test]
async fn rejects_empty_cohort() {
    let payload = json!({
        "program_type": "initial_licensure",
        "program": {
            "program_name": "Surgical Technology",
            "tuition_estimate": 5000.0,
            "cohort_size": 0,
            "total_seat_hours": 600.0
        }
    });

    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/programs/evaluate")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await;
    assert_eq!(
        body["error"],
        "invalid program input: cohort size must be greater than zero"
    );
}
