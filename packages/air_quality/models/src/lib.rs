#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Pollutant, snapshot and risk tier types.
//!
//! This crate defines the plain data records that flow through the risk
//! pipeline: pollutant concentrations, the fully resolved [`AqiSnapshot`],
//! the WHO reference table used to normalise every computation, and the
//! three-tier [`RiskNarrative`] handed to the presentation layer.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Pollutant layers rendered on the globe and sampled per city.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Pollutant {
    /// Nitrogen dioxide
    #[serde(rename = "NO2")]
    #[strum(serialize = "NO2")]
    No2,
    /// Ground-level ozone
    Ozone,
    /// Fine particulate matter (PM2.5)
    #[serde(rename = "PM")]
    #[strum(serialize = "PM")]
    Pm,
}

impl Pollutant {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::No2, Self::Ozone, Self::Pm]
    }
}

/// Concentrations of the three tracked pollutants, in µg/m³.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollutantConcentrations {
    /// Nitrogen dioxide.
    pub no2: f64,
    /// Fine particulate matter.
    pub pm25: f64,
    /// Ozone.
    pub o3: f64,
}

impl PollutantConcentrations {
    /// Returns the concentration for a single pollutant layer.
    #[must_use]
    pub const fn get(&self, pollutant: Pollutant) -> f64 {
        match pollutant {
            Pollutant::No2 => self.no2,
            Pollutant::Ozone => self.o3,
            Pollutant::Pm => self.pm25,
        }
    }
}

/// One synthetic sample on the globe overlay: a city, a pollutant layer,
/// and a relative intensity in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollutionSamplePoint {
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lon: f64,
    /// Pollutant layer this sample belongs to.
    #[serde(rename = "type")]
    pub pollutant: Pollutant,
    /// Relative severity, `0.0..=1.0`.
    pub intensity: f64,
    /// Owning city name.
    pub name: String,
}

/// WHO Air Quality Guideline reference concentrations (µg/m³).
///
/// Used purely as normalisation denominators for the composite index and
/// the by-fraction tiering policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoLimits {
    /// 24h NO2 guideline.
    pub no2: f64,
    /// 24h PM2.5 guideline.
    pub pm25: f64,
    /// Peak-season O3 guideline.
    pub o3: f64,
}

/// The process-wide WHO reference table.
pub const WHO_LIMITS: WhoLimits = WhoLimits {
    no2: 25.0,
    pm25: 15.0,
    o3: 60.0,
};

impl WhoLimits {
    /// Ratio of each concentration to its limit, in `[no2, pm25, o3]` order.
    ///
    /// Ratios may be non-finite when a limit is zero; callers coerce.
    #[must_use]
    pub fn ratios(&self, concentrations: &PollutantConcentrations) -> [f64; 3] {
        [
            concentrations.no2 / self.no2,
            concentrations.pm25 / self.pm25,
            concentrations.o3 / self.o3,
        ]
    }
}

/// A fully resolved set of pollutant and weather values for one coordinate.
///
/// Constructed fresh per query and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AqiSnapshot {
    /// Nitrogen dioxide (µg/m³).
    pub no2: f64,
    /// Fine particulate matter (µg/m³).
    pub pm25: f64,
    /// Ozone (µg/m³).
    pub o3: f64,
    /// Relative humidity, 0-100.
    pub humidity: f64,
    /// Wind speed in m/s.
    pub wind_speed: f64,
    /// Composite index, 0-300.
    pub aqi: u16,
}

impl AqiSnapshot {
    /// The pollutant part of this snapshot.
    #[must_use]
    pub const fn concentrations(&self) -> PollutantConcentrations {
        PollutantConcentrations {
            no2: self.no2,
            pm25: self.pm25,
            o3: self.o3,
        }
    }
}

/// Three-level exposure classification.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum RiskTier {
    /// Below every threshold
    Good,
    /// Partial compliance
    Moderate,
    /// At least one pollutant over its limit
    #[serde(rename = "High risk")]
    #[strum(serialize = "High risk")]
    HighRisk,
}

/// Which threshold rule a call site classifies with.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TieringPolicy {
    /// `aqi >= 150` is high risk, `aqi >= 100` moderate.
    ByAqi,
    /// Any pollutant at its WHO limit is high risk, above 40% moderate.
    ByFraction,
}

/// Display locale for narrative text.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    /// English
    #[default]
    En,
    /// French
    Fr,
}

/// Where a snapshot's values came from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SnapshotOrigin {
    /// Live mode is off; coordinate-seeded values.
    Synthetic,
    /// At least one live provider returned data.
    Live,
    /// Live mode is on but no provider returned data; coordinate-seeded
    /// values substituted.
    Degraded,
}

/// Tiered, human-readable description of a snapshot.
///
/// Always recomputed from its snapshot; has no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskNarrative {
    /// The classification.
    pub tier: RiskTier,
    /// Locale-specific label for `tier`.
    pub label: String,
    /// Free-text summary interpolating the concentrations and limits.
    pub summary: String,
    /// Guidance for vulnerable populations.
    pub vulnerable_profiles: String,
}
