use serde::{Deserialize, Serialize};

use super::classify::OccupationCategory;

/// One step of the wage fallback chain. The resolver walks its tiers in order
/// and stops at the first one that yields a plausible annual median.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WageTier {
    /// Region-specific lookup against the wage service.
    RegionalService,
    /// National lookup against the wage service, scaled by the regional multiplier.
    NationalServiceAdjusted,
    /// Last-known-good national median compiled into the crate, scaled by the regional multiplier.
    LastKnownNational,
}

impl WageTier {
    pub const DEFAULT_CHAIN: [WageTier; 3] = [
        WageTier::RegionalService,
        WageTier::NationalServiceAdjusted,
        WageTier::LastKnownNational,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            WageTier::RegionalService => "regional wage lookup",
            WageTier::NationalServiceAdjusted => "national wage lookup",
            WageTier::LastKnownNational => "last-known national median",
        }
    }

    /// Whether the tier answers from the wage service rather than compiled-in data.
    pub const fn queries_service(self) -> bool {
        matches!(
            self,
            WageTier::RegionalService | WageTier::NationalServiceAdjusted
        )
    }
}

/// Annual medians last observed for each occupation; used when the service is unreachable.
pub const fn last_known_national_median(category: OccupationCategory) -> f64 {
    match category {
        OccupationCategory::HealthSpecialties => 100_300.0,
        OccupationCategory::ComputerScience => 87_000.0,
        OccupationCategory::Business => 94_000.0,
        OccupationCategory::CareerTechnical => 64_810.0,
        OccupationCategory::PostsecondaryGeneral => 80_840.0,
    }
}

// Approximate cost-of-labor multipliers relative to the national median.
// Not authoritative; only used to scale national figures.
const REGIONAL_MULTIPLIERS: &[(&str, f64)] = &[
    ("AK", 1.12),
    ("AL", 0.88),
    ("AR", 0.86),
    ("AZ", 0.97),
    ("CA", 1.18),
    ("CO", 1.05),
    ("CT", 1.12),
    ("DC", 1.22),
    ("FL", 0.95),
    ("GA", 0.95),
    ("HI", 1.10),
    ("IA", 0.92),
    ("IL", 1.03),
    ("IN", 0.92),
    ("KS", 0.91),
    ("KY", 0.90),
    ("LA", 0.89),
    ("MA", 1.16),
    ("MD", 1.10),
    ("MI", 0.96),
    ("MN", 1.02),
    ("MO", 0.92),
    ("MS", 0.85),
    ("NC", 0.94),
    ("NE", 0.93),
    ("NJ", 1.12),
    ("NM", 0.92),
    ("NV", 0.98),
    ("NY", 1.15),
    ("OH", 0.94),
    ("OK", 0.88),
    ("OR", 1.04),
    ("PA", 0.99),
    ("SC", 0.90),
    ("TN", 0.91),
    ("TX", 0.97),
    ("UT", 0.96),
    ("VA", 1.04),
    ("WA", 1.10),
    ("WI", 0.95),
    ("WV", 0.86),
];

pub fn is_known_region(code: &str) -> bool {
    REGIONAL_MULTIPLIERS.iter().any(|(known, _)| *known == code)
}

/// Multiplier for a normalized region code; unknown or absent regions scale by 1.0.
pub fn regional_multiplier(region: Option<&str>) -> f64 {
    region
        .and_then(|code| {
            REGIONAL_MULTIPLIERS
                .iter()
                .find(|(known, _)| *known == code)
                .map(|(_, multiplier)| *multiplier)
        })
        .unwrap_or(1.0)
}
