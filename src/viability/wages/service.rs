use std::future::Future;
use std::time::Duration;

use serde::Deserialize;

use crate::config::WageServiceConfig;

/// Error reported by an occupation-wage backend. The resolver treats every
/// variant as a reason to fall through to its next tier.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WageServiceError {
    #[error("wage service unavailable: {0}")]
    Unavailable(String),
    #[error("wage service responded with status {0}")]
    Status(u16),
    #[error("wage service returned a malformed body: {0}")]
    Malformed(String),
    #[error("wage service returned no median wage")]
    MissingMedian,
}

/// Occupation-wage lookup consumed by the resolver.
///
/// `region` is `None` for a national lookup. Implementations must be idempotent;
/// the resolver may call them once per tier.
pub trait WageService: Send + Sync {
    fn median_annual_wage(
        &self,
        occupation_code: &str,
        region: Option<&str>,
    ) -> impl Future<Output = Result<f64, WageServiceError>> + Send;
}

#[derive(Debug, Deserialize)]
struct WageResponse {
    median_annual_wage: Option<f64>,
}

/// reqwest-backed client for the occupation-wage HTTP service.
#[derive(Debug, Clone)]
pub struct HttpWageService {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpWageService {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, WageServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| WageServiceError::Unavailable(err.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn endpoint(&self, occupation_code: &str, region: Option<&str>) -> String {
        match region {
            Some(region) => format!(
                "{}/occupations/{}/wages/{}",
                self.base_url, occupation_code, region
            ),
            None => format!("{}/occupations/{}/wages", self.base_url, occupation_code),
        }
    }
}

impl WageService for HttpWageService {
    async fn median_annual_wage(
        &self,
        occupation_code: &str,
        region: Option<&str>,
    ) -> Result<f64, WageServiceError> {
        let url = self.endpoint(occupation_code, region);
        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| WageServiceError::Unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WageServiceError::Status(status.as_u16()));
        }

        let body: WageResponse = response
            .json()
            .await
            .map_err(|err| WageServiceError::Malformed(err.to_string()))?;

        body.median_annual_wage
            .ok_or(WageServiceError::MissingMedian)
    }
}

/// Stand-in used when no wage service is configured; every lookup fails,
/// so resolution lands on the last-known medians.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineWageService;

impl WageService for OfflineWageService {
    async fn median_annual_wage(
        &self,
        _occupation_code: &str,
        _region: Option<&str>,
    ) -> Result<f64, WageServiceError> {
        Err(WageServiceError::Unavailable(
            "no wage service configured".to_string(),
        ))
    }
}

/// Backend selected from [`WageServiceConfig`] at startup.
#[derive(Debug, Clone)]
pub enum WageBackend {
    Http(HttpWageService),
    Offline(OfflineWageService),
}

impl WageBackend {
    pub fn from_config(config: &WageServiceConfig) -> Result<Self, WageServiceError> {
        match &config.base_url {
            Some(base_url) => {
                let service = HttpWageService::new(
                    base_url.clone(),
                    config.api_key.clone(),
                    Duration::from_secs(config.timeout_secs),
                )?;
                Ok(Self::Http(service))
            }
            None => Ok(Self::Offline(OfflineWageService)),
        }
    }
}

impl WageService for WageBackend {
    async fn median_annual_wage(
        &self,
        occupation_code: &str,
        region: Option<&str>,
    ) -> Result<f64, WageServiceError> {
        match self {
            WageBackend::Http(service) => service.median_annual_wage(occupation_code, region).await,
            WageBackend::Offline(service) => {
                service.median_annual_wage(occupation_code, region).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    async fn spawn_stub() -> String {
        let app = Router::new()
            .route(
                "/occupations/:code/wages",
                get(|Path(code): Path<String>| async move {
                    if code == "25-1194" {
                        (StatusCode::OK, Json(json!({ "median_annual_wage": 64810.0 })))
                    } else {
                        (StatusCode::OK, Json(json!({ "median_annual_wage": null })))
                    }
                }),
            )
            .route(
                "/occupations/:code/wages/:region",
                get(|Path((_code, region)): Path<(String, String)>| async move {
                    if region == "IA" {
                        (StatusCode::OK, Json(json!({ "median_annual_wage": 59000.0 })))
                    } else {
                        (
                            StatusCode::NOT_FOUND,
                            Json(json!({ "error": "unknown area" })),
                        )
                    }
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server runs");
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn http_service_reads_national_and_regional_medians() {
        let base_url = spawn_stub().await;
        let service =
            HttpWageService::new(base_url, None, Duration::from_secs(2)).expect("client builds");

        let national = service
            .median_annual_wage("25-1194", None)
            .await
            .expect("national median");
        assert_eq!(national, 64_810.0);

        let regional = service
            .median_annual_wage("25-1194", Some("IA"))
            .await
            .expect("regional median");
        assert_eq!(regional, 59_000.0);
    }

    #[tokio::test]
    async fn http_service_reports_status_and_missing_medians() {
        let base_url = spawn_stub().await;
        let service =
            HttpWageService::new(base_url, None, Duration::from_secs(2)).expect("client builds");

        let missing_region = service.median_annual_wage("25-1194", Some("ZZ")).await;
        assert_eq!(missing_region, Err(WageServiceError::Status(404)));

        let missing_median = service.median_annual_wage("25-1071", None).await;
        assert_eq!(missing_median, Err(WageServiceError::MissingMedian));
    }

    #[tokio::test]
    async fn unconfigured_backend_is_offline() {
        let backend = WageBackend::from_config(&WageServiceConfig {
            base_url: None,
            api_key: None,
            timeout_secs: 5,
        })
        .expect("backend builds");

        assert!(matches!(backend, WageBackend::Offline(_)));
        assert!(matches!(
            backend.median_annual_wage("25-1199", None).await,
            Err(WageServiceError::Unavailable(_))
        ));
    }
}
