#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Best-effort live air quality snapshots.
//!
//! When live data is enabled, [`fetcher::SnapshotFetcher`] queries two
//! providers concurrently, each raced against [`FETCH_TIMEOUT`]:
//!
//! 1. **Open-Meteo** air quality API: hourly satellite/model pm2.5, NO2,
//!    O3, humidity and wind.
//! 2. **OpenAQ** latest measurements: ground-station pm2.5, preferred over
//!    the satellite value when present.
//!
//! Providers are configured via TOML files in `services/` (see
//! [`service_registry`]). Every failure (timeout, transport, status, JSON)
//! is logged and treated as absent data; the composite index is always
//! recomputed locally. When live data is disabled no request is made and
//! the coordinate-seeded fallback is returned directly.

pub mod fetcher;
pub mod open_meteo;
pub mod openaq;
pub mod service_registry;
pub mod transport;

use std::time::Duration;

use thiserror::Error;

/// Upper bound on each provider request.
pub const FETCH_TIMEOUT: Duration = Duration::from_millis(9000);

/// Errors from a single provider request.
///
/// These never escape [`fetcher::SnapshotFetcher::fetch`]; they exist so
/// transports and parsers can report what went wrong before the fetcher
/// absorbs it.
#[derive(Debug, Error)]
pub enum LiveError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Response status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The request did not finish within [`FETCH_TIMEOUT`].
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}

/// Reads a JSON number or numeric string as a finite `f64`.
///
/// Provider payloads are untrusted: anything else (null, objects,
/// unparseable strings, NaN) is treated as absent.
#[must_use]
pub fn lenient_number(value: &serde_json::Value) -> Option<f64> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}
