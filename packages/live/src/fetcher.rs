//! Live snapshot fetcher.
//!
//! Issues the Open-Meteo and `OpenAQ` requests concurrently, each raced
//! against the configured timeout, and folds whatever arrived into an
//! [`AqiSnapshot`]. Nothing here returns an error: failures are logged and
//! the affected fields default to 0. If neither provider yields any value
//! at all, the coordinate-seeded fallback is substituted and the outcome
//! is marked [`SnapshotOrigin::Degraded`].

use std::time::Duration;

pub use air_vision_air_quality_models::SnapshotOrigin;

use air_vision_air_quality_models::{AqiSnapshot, PollutantConcentrations};
use air_vision_synth::{fallback_snapshot, round_to};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::open_meteo::{self, AirQualityReading};
use crate::openaq;
use crate::service_registry::{self, LiveService, ProviderConfig};
use crate::transport::JsonTransport;
use crate::{FETCH_TIMEOUT, LiveError};

/// A snapshot plus provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOutcome {
    /// The resolved snapshot.
    pub snapshot: AqiSnapshot,
    /// Where its values came from.
    pub origin: SnapshotOrigin,
    /// When the fetch completed.
    pub fetched_at: DateTime<Utc>,
}

/// Resolves snapshots for coordinates, live or synthetic.
pub struct SnapshotFetcher<T: JsonTransport> {
    transport: T,
    services: Vec<LiveService>,
    timeout: Duration,
}

impl<T: JsonTransport> SnapshotFetcher<T> {
    /// Creates a fetcher over the enabled providers from the registry.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            services: service_registry::enabled_services(),
            timeout: FETCH_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the provider list.
    #[must_use]
    pub fn with_services(mut self, services: Vec<LiveService>) -> Self {
        self.services = services;
        self
    }

    /// The underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolves a snapshot for `(lat, lon)`.
    ///
    /// With `live_data` off this performs no I/O and returns the
    /// coordinate-seeded fallback.
    pub async fn fetch(&self, lat: f64, lon: f64, live_data: bool) -> FetchOutcome {
        if !live_data {
            log::debug!("Live data disabled, synthesizing snapshot for ({lat}, {lon})");
            return outcome(fallback_snapshot(lat, lon), SnapshotOrigin::Synthetic);
        }

        let cache_buster = Utc::now().timestamp_millis();
        let (air, ground) = tokio::join!(
            self.fetch_air_quality(lat, lon, cache_buster),
            self.fetch_ground_pm25(lat, lon, cache_buster),
        );

        let air = air.unwrap_or_default();
        if air == AirQualityReading::default() && ground.is_none() {
            log::warn!("No live data for ({lat}, {lon}), using synthesized fallback");
            return outcome(fallback_snapshot(lat, lon), SnapshotOrigin::Degraded);
        }

        let concentrations = PollutantConcentrations {
            no2: round_to(air.no2.unwrap_or(0.0), 1),
            pm25: round_to(ground.or(air.pm25).unwrap_or(0.0), 1),
            o3: round_to(air.o3.unwrap_or(0.0), 1),
        };
        let snapshot = air_vision_risk::snapshot_from(
            concentrations,
            round_to(air.humidity.unwrap_or(0.0), 0),
            round_to(air.wind_speed.unwrap_or(0.0), 1),
        );

        log::info!(
            "Live snapshot for ({lat}, {lon}): aqi={} (ground pm2.5: {})",
            snapshot.aqi,
            ground.is_some()
        );
        outcome(snapshot, SnapshotOrigin::Live)
    }

    async fn fetch_air_quality(
        &self,
        lat: f64,
        lon: f64,
        cache_buster: i64,
    ) -> Option<AirQualityReading> {
        let (service, base_url, hourly) = self.services.iter().find_map(|s| match &s.provider {
            ProviderConfig::OpenMeteo { base_url, hourly } => Some((s, base_url, hourly)),
            ProviderConfig::OpenAq { .. } => None,
        })?;

        let query = open_meteo::build_query(lat, lon, hourly, cache_buster);
        let body = self.request(service, base_url, &query).await?;
        Some(open_meteo::parse_response(&body))
    }

    async fn fetch_ground_pm25(&self, lat: f64, lon: f64, cache_buster: i64) -> Option<f64> {
        let (service, base_url, radius_m, parameter) =
            self.services.iter().find_map(|s| match &s.provider {
                ProviderConfig::OpenAq {
                    base_url,
                    radius_m,
                    parameter,
                } => Some((s, base_url, *radius_m, parameter)),
                ProviderConfig::OpenMeteo { .. } => None,
            })?;

        let query = openaq::build_query(lat, lon, radius_m, parameter, cache_buster);
        let body = self.request(service, base_url, &query).await?;
        openaq::parse_response(&body)
    }

    async fn request(
        &self,
        service: &LiveService,
        url: &str,
        query: &[(String, String)],
    ) -> Option<serde_json::Value> {
        let result = tokio::time::timeout(self.timeout, self.transport.get_json(url, query))
            .await
            .unwrap_or(Err(LiveError::Timeout(self.timeout)));

        match result {
            Ok(body) => Some(body),
            Err(e) => {
                log::warn!("{} unavailable: {e}", service.name);
                None
            }
        }
    }
}

fn outcome(snapshot: AqiSnapshot, origin: SnapshotOrigin) -> FetchOutcome {
    FetchOutcome {
        snapshot,
        origin,
        fetched_at: Utc::now(),
    }
}
