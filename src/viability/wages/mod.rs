//! Instructional wage resolution.
//!
//! A program name is classified into an instructor occupation, then an hourly rate is
//! resolved through an ordered chain of [`WageTier`]s against a [`WageService`]. Resolution
//! never fails: the final tier is a compiled-in median, and the `source` on the returned
//! [`WageEstimate`] records which tier answered and why earlier tiers were skipped.

mod classify;
mod service;
mod tiers;

pub use classify::{classify_program, OccupationCategory};
pub use service::{HttpWageService, OfflineWageService, WageBackend, WageService, WageServiceError};
pub use tiers::{is_known_region, last_known_national_median, regional_multiplier, WageTier};

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Resolved instructional wage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WageEstimate {
    pub hourly_rate: f64,
    pub annual_median: f64,
    pub source: String,
}

/// Tunables for the fallback chain.
///
/// `sanity_floor` and `sanity_ceiling` bound what counts as a plausible annual median
/// from the service. They are judgment calls, not published thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WageResolverPolicy {
    pub sanity_floor: f64,
    pub sanity_ceiling: f64,
    pub annual_hours: f64,
}

impl WageResolverPolicy {
    pub fn standard() -> Self {
        Self {
            sanity_floor: 20_000.0,
            sanity_ceiling: 500_000.0,
            annual_hours: 2_080.0,
        }
    }

    /// `annual_hours` must be positive and the sanity band must be a finite, positive range.
    pub fn validate(&self) -> Result<(), WagePolicyError> {
        if !self.annual_hours.is_finite() || self.annual_hours <= 0.0 {
            return Err(WagePolicyError::AnnualHours(self.annual_hours));
        }
        let band_is_finite = self.sanity_floor.is_finite() && self.sanity_ceiling.is_finite();
        if !band_is_finite || self.sanity_floor <= 0.0 || self.sanity_floor > self.sanity_ceiling {
            return Err(WagePolicyError::SanityBand {
                floor: self.sanity_floor,
                ceiling: self.sanity_ceiling,
            });
        }
        Ok(())
    }

    pub fn is_plausible(&self, annual_median: f64) -> bool {
        annual_median.is_finite()
            && annual_median >= self.sanity_floor
            && annual_median <= self.sanity_ceiling
    }

    fn hourly_rate(&self, annual_median: f64) -> f64 {
        (annual_median / self.annual_hours * 100.0).round() / 100.0
    }
}

impl Default for WageResolverPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WagePolicyError {
    #[error("annual_hours must be a positive number, got {0}")]
    AnnualHours(f64),
    #[error("wage sanity band must satisfy 0 < floor <= ceiling, got {floor}-{ceiling}")]
    SanityBand { floor: f64, ceiling: f64 },
}

type CacheKey = (OccupationCategory, Option<String>);

/// Walks the wage tiers in order and memoises service answers by (occupation, region).
///
/// Fallback estimates are never cached, so a recovered service is consulted again.
pub struct WageResolver<S> {
    service: S,
    policy: WageResolverPolicy,
    tiers: Vec<WageTier>,
    cache: Mutex<HashMap<CacheKey, WageEstimate>>,
}

impl<S> WageResolver<S>
where
    S: WageService,
{
    pub fn new(service: S, policy: WageResolverPolicy) -> Self {
        Self::with_tiers(service, policy, WageTier::DEFAULT_CHAIN.to_vec())
    }

    pub fn with_tiers(service: S, policy: WageResolverPolicy, tiers: Vec<WageTier>) -> Self {
        Self {
            service,
            policy,
            tiers,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Classify `program_name` and resolve the hourly rate for its occupation.
    pub async fn resolve(&self, program_name: &str, region: Option<&str>) -> WageEstimate {
        let category = classify_program(program_name);
        debug!(program_name, ?category, "classified program occupation");
        self.resolve_category(category, region).await
    }

    pub async fn resolve_category(
        &self,
        category: OccupationCategory,
        region: Option<&str>,
    ) -> WageEstimate {
        let region = normalize_region(region);
        let key = (category, region.clone());
        if let Some(hit) = self.cached(&key) {
            return hit;
        }

        let mut skipped: Vec<String> = Vec::new();
        for tier in &self.tiers {
            match self.attempt(*tier, category, region.as_deref()).await {
                Ok((annual_median, detail)) => {
                    let estimate = self.estimate(annual_median, detail, &skipped);
                    if tier.queries_service() {
                        self.remember(key, estimate.clone());
                    }
                    return estimate;
                }
                Err(reason) => {
                    warn!(
                        tier = tier.label(),
                        occupation = category.soc_code(),
                        region = region.as_deref().unwrap_or("national"),
                        %reason,
                        "wage tier skipped"
                    );
                    skipped.push(format!("{}: {}", tier.label(), reason));
                }
            }
        }

        // A custom chain may omit the compiled-in tier; it still backs every resolution.
        let (annual_median, detail) = self.last_known(category, region.as_deref());
        self.estimate(annual_median, detail, &skipped)
    }

    async fn attempt(
        &self,
        tier: WageTier,
        category: OccupationCategory,
        region: Option<&str>,
    ) -> Result<(f64, String), String> {
        match tier {
            WageTier::RegionalService => {
                let Some(region) = region else {
                    return Err("no region supplied".to_string());
                };
                let annual = self
                    .service
                    .median_annual_wage(category.soc_code(), Some(region))
                    .await
                    .map_err(|err| err.to_string())?;
                self.check_plausible(annual)?;
                Ok((
                    annual,
                    format!(
                        "Occupation wage service, SOC {} ({}), region {}",
                        category.soc_code(),
                        category.title(),
                        region
                    ),
                ))
            }
            WageTier::NationalServiceAdjusted => {
                let annual = self
                    .service
                    .median_annual_wage(category.soc_code(), None)
                    .await
                    .map_err(|err| err.to_string())?;
                self.check_plausible(annual)?;
                let multiplier = regional_multiplier(region);
                Ok((
                    annual * multiplier,
                    format!(
                        "Occupation wage service national median, SOC {} ({}){}",
                        category.soc_code(),
                        category.title(),
                        adjustment_note(region, multiplier)
                    ),
                ))
            }
            WageTier::LastKnownNational => Ok(self.last_known(category, region)),
        }
    }

    fn check_plausible(&self, annual_median: f64) -> Result<(), String> {
        if self.policy.is_plausible(annual_median) {
            Ok(())
        } else {
            Err(format!(
                "median {:.0} outside plausible range {:.0}-{:.0}",
                annual_median, self.policy.sanity_floor, self.policy.sanity_ceiling
            ))
        }
    }

    fn last_known(&self, category: OccupationCategory, region: Option<&str>) -> (f64, String) {
        let multiplier = regional_multiplier(region);
        (
            last_known_national_median(category) * multiplier,
            format!(
                "Last-known national median (compiled-in), SOC {} ({}){}",
                category.soc_code(),
                category.title(),
                adjustment_note(region, multiplier)
            ),
        )
    }

    fn estimate(&self, annual_median: f64, detail: String, skipped: &[String]) -> WageEstimate {
        let source = if skipped.is_empty() {
            detail
        } else {
            format!("{detail}; fell back after {}", skipped.join("; "))
        };

        WageEstimate {
            hourly_rate: self.policy.hourly_rate(annual_median),
            annual_median,
            source,
        }
    }

    fn cached(&self, key: &CacheKey) -> Option<WageEstimate> {
        let guard = self
            .cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.get(key).cloned()
    }

    #[cfg(test)]
    pub(crate) fn cached_entries(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn remember(&self, key: CacheKey, estimate: WageEstimate) {
        let mut guard = self
            .cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.insert(key, estimate);
    }
}

// Codes outside the regional table resolve nationally, which keeps the cache key space bounded.
fn normalize_region(region: Option<&str>) -> Option<String> {
    region
        .map(|raw| {
            raw.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_uppercase()
        })
        .filter(|code| is_known_region(code))
}

fn adjustment_note(region: Option<&str>, multiplier: f64) -> String {
    match region {
        Some(region) => format!(
            ", adjusted x{multiplier:.2} for {region} (approximate regional multiplier, non-authoritative)"
        ),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hourly_rate_rounds_to_cents() {
        let policy = WageResolverPolicy::standard();
        assert_eq!(policy.hourly_rate(64_810.0), 31.16);
        assert_eq!(policy.hourly_rate(62_400.0), 30.0);
    }

    #[test]
    fn plausibility_band_is_inclusive() {
        let policy = WageResolverPolicy::standard();
        assert!(policy.is_plausible(20_000.0));
        assert!(!policy.is_plausible(19_999.0));
        assert!(!policy.is_plausible(f64::NAN));
        assert!(!policy.is_plausible(750_000.0));
    }

    #[test]
    fn regions_are_normalized() {
        assert_eq!(normalize_region(Some(" ia ")), Some("IA".to_string()));
        assert_eq!(normalize_region(Some("  ")), None);
        assert_eq!(normalize_region(Some("Atlantis-7")), None);
        assert_eq!(normalize_region(None), None);
    }

    #[test]
    fn policy_rejects_zero_annual_hours() {
        let policy = WageResolverPolicy {
            annual_hours: 0.0,
            ..WageResolverPolicy::standard()
        };
        assert_eq!(policy.validate(), Err(WagePolicyError::AnnualHours(0.0)));
    }

    #[test]
    fn policy_rejects_inverted_or_non_finite_band() {
        let inverted = WageResolverPolicy {
            sanity_floor: 600_000.0,
            ..WageResolverPolicy::standard()
        };
        assert!(matches!(
            inverted.validate(),
            Err(WagePolicyError::SanityBand { .. })
        ));

        let unbounded = WageResolverPolicy {
            sanity_ceiling: f64::INFINITY,
            ..WageResolverPolicy::standard()
        };
        assert!(unbounded.validate().is_err());
        assert!(WageResolverPolicy::standard().validate().is_ok());
    }
}
