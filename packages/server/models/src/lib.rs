#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the air vision server.
//!
//! These types are serialized to JSON for the REST API. Insight and
//! snapshot records are reused from the domain crates; this crate only
//! adds the envelopes and query parameters.

use air_vision_air_quality_models::{
    AqiSnapshot, Pollutant, PollutionSamplePoint, RiskNarrative, SnapshotOrigin,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

/// Query parameters for the samples endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplesQueryParams {
    /// Hours ahead of now; defaults to 0.
    pub time_offset: Option<i32>,
    /// Comma-separated layer names (`NO2,Ozone,PM`); absent means all.
    pub layers: Option<String>,
}

/// The sample grid for one time offset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSamples {
    pub time_offset: i32,
    pub points: Vec<PollutionSamplePoint>,
}

/// Query parameters for a sample marker click.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointInsightParams {
    /// Index into the layer-filtered sample list.
    pub index: usize,
    pub time_offset: Option<i32>,
    pub layers: Option<String>,
}

/// Query parameters for a globe surface click.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceInsightParams {
    pub lat: f64,
    pub lon: f64,
    pub time_offset: Option<i32>,
}

/// Query parameters for the snapshot endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotParams {
    pub lat: f64,
    pub lon: f64,
}

/// A snapshot with its narrative and provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSnapshot {
    pub snapshot: AqiSnapshot,
    pub narrative: RiskNarrative,
    /// `degraded` means live data was requested but estimates were used.
    pub origin: SnapshotOrigin,
    pub fetched_at: DateTime<Utc>,
}

/// Parses a comma-separated layer list, skipping unknown names.
#[must_use]
pub fn parse_layers(layers: Option<&str>) -> Vec<Pollutant> {
    layers
        .map(|s| s.split(',').filter_map(|l| l.trim().parse().ok()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_layer_lists() {
        assert_eq!(
            parse_layers(Some("NO2, PM,bogus")),
            vec![Pollutant::No2, Pollutant::Pm]
        );
        assert!(parse_layers(Some("")).is_empty());
        assert!(parse_layers(None).is_empty());
    }

    #[test]
    fn snapshot_origin_serializes_snake_case() {
        let value = serde_json::to_value(SnapshotOrigin::Degraded).unwrap();
        assert_eq!(value, "degraded");
    }
}
