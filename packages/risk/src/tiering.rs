//! Three-tier exposure classification.
//!
//! Two threshold rules coexist and every call site names the one it uses
//! through [`TieringPolicy`]:
//!
//! - [`TieringPolicy::ByAqi`]: `aqi >= 150` is high risk, `aqi >= 100`
//!   moderate.
//! - [`TieringPolicy::ByFraction`]: any pollutant at or above its WHO limit
//!   is high risk, strictly above 40% of its limit moderate.

use air_vision_air_quality_models::{
    AqiSnapshot, PollutantConcentrations, RiskTier, TieringPolicy, WHO_LIMITS, WhoLimits,
};

/// Composite index at which exposure becomes high risk.
pub const HIGH_RISK_AQI: u16 = 150;

/// Composite index at which exposure becomes moderate.
pub const MODERATE_AQI: u16 = 100;

/// Fraction of a WHO limit at which exposure becomes moderate.
pub const MODERATE_FRACTION: f64 = 0.4;

/// Classifies a snapshot under the given policy.
#[must_use]
pub fn classify(policy: TieringPolicy, snapshot: &AqiSnapshot) -> RiskTier {
    match policy {
        TieringPolicy::ByAqi => classify_by_aqi(snapshot.aqi),
        TieringPolicy::ByFraction => {
            classify_by_fraction(&WHO_LIMITS, &snapshot.concentrations())
        }
    }
}

/// Classifies a composite index.
#[must_use]
pub const fn classify_by_aqi(aqi: u16) -> RiskTier {
    if aqi >= HIGH_RISK_AQI {
        RiskTier::HighRisk
    } else if aqi >= MODERATE_AQI {
        RiskTier::Moderate
    } else {
        RiskTier::Good
    }
}

/// Classifies raw concentrations against scaled WHO limits.
///
/// NaN concentrations never satisfy a comparison and so fall through to
/// [`RiskTier::Good`].
#[must_use]
pub fn classify_by_fraction(
    limits: &WhoLimits,
    concentrations: &PollutantConcentrations,
) -> RiskTier {
    if any_at_least(limits, concentrations, 1.0) {
        RiskTier::HighRisk
    } else if any_above(limits, concentrations, MODERATE_FRACTION) {
        RiskTier::Moderate
    } else {
        RiskTier::Good
    }
}

fn any_at_least(limits: &WhoLimits, c: &PollutantConcentrations, fraction: f64) -> bool {
    c.no2 >= limits.no2 * fraction || c.pm25 >= limits.pm25 * fraction || c.o3 >= limits.o3 * fraction
}

fn any_above(limits: &WhoLimits, c: &PollutantConcentrations, fraction: f64) -> bool {
    c.no2 > limits.no2 * fraction || c.pm25 > limits.pm25 * fraction || c.o3 > limits.o3 * fraction
}
