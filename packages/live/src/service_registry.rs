//! Compile-time registry of live data provider configurations.
//!
//! Each provider is defined in a TOML file under `services/`. The registry
//! embeds these at compile time and exposes them via [`all_services`] and
//! [`enabled_services`].

use serde::Deserialize;

/// A live data provider configuration loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveService {
    /// Unique identifier (e.g., `"open_meteo"`, `"openaq"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether this provider is queried in live mode.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Provider-specific configuration.
    pub provider: ProviderConfig,
}

/// Provider-specific configuration, tagged by `type` in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Open-Meteo air quality API (satellite/model data).
    OpenMeteo {
        /// API endpoint.
        base_url: String,
        /// Hourly variables requested.
        hourly: Vec<String>,
    },
    /// `OpenAQ` latest measurements (ground stations).
    OpenAq {
        /// API endpoint.
        base_url: String,
        /// Search radius around the coordinate, in metres.
        radius_m: u32,
        /// Measured parameter (e.g. `"pm25"`).
        parameter: String,
    },
}

const fn default_true() -> bool {
    true
}

impl LiveService {
    /// Returns the provider's base URL regardless of variant.
    #[must_use]
    pub fn base_url(&self) -> &str {
        match &self.provider {
            ProviderConfig::OpenMeteo { base_url, .. } | ProviderConfig::OpenAq { base_url, .. } => {
                base_url
            }
        }
    }
}

// ── Compile-time embedded TOML files ────────────────────────────────

const SERVICE_TOMLS: &[(&str, &str)] = &[
    ("open_meteo", include_str!("../services/open_meteo.toml")),
    ("openaq", include_str!("../services/openaq.toml")),
];

#[cfg(test)]
const EXPECTED_SERVICE_COUNT: usize = 2;

/// Returns all provider configurations (enabled and disabled).
///
/// Malformed entries are logged and skipped.
#[must_use]
pub fn all_services() -> Vec<LiveService> {
    SERVICE_TOMLS
        .iter()
        .filter_map(|(name, toml_str)| match toml::de::from_str(toml_str) {
            Ok(service) => Some(service),
            Err(e) => {
                log::error!("Failed to parse live service '{name}': {e}");
                None
            }
        })
        .collect()
}

/// Returns only enabled providers.
#[must_use]
pub fn enabled_services() -> Vec<LiveService> {
    all_services().into_iter().filter(|s| s.enabled).collect()
}
