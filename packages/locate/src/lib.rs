#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Turns globe clicks and location text into [`LocationInsight`]s.
//!
//! Three click paths exist:
//!
//! - **Sample point**: the clicked marker's city aggregate ([`point`]).
//! - **Region**: clicks inside a special bounding box average every sample
//!   inside it ([`region`]). Takes precedence when it applies.
//! - **Nearest city**: otherwise the great-circle nearest city aggregate
//!   ([`nearest`]).
//!
//! All three classify with
//! [`TieringPolicy::ByAqi`](air_vision_air_quality_models::TieringPolicy::ByAqi).
//! The health assistant resolves free text through [`parse`] instead.

pub mod nearest;
pub mod parse;
pub mod point;
pub mod region;

use air_vision_air_quality_models::{
    Locale, PollutantConcentrations, PollutionSamplePoint, TieringPolicy,
};
use air_vision_locate_models::LocationInsight;
use air_vision_risk::locale::DATA_SOURCES;
use air_vision_synth::round_to;
use thiserror::Error;

pub use parse::parse_coordinates;

/// Errors from resolving user-entered location text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// The `lat,lon` text did not contain two finite numbers.
    #[error("Invalid coordinates: {input}")]
    InvalidCoordinates {
        /// The rejected text.
        input: String,
    },

    /// No coordinates, no prior location and no known city matched.
    #[error("Unknown location: {input}")]
    UnknownLocation {
        /// The rejected city text.
        input: String,
    },
}

/// Resolves a click on the globe surface.
///
/// Tries the regional path first and falls back to the nearest city
/// aggregate of `points`.
#[must_use]
pub fn surface_insight(
    lat: f64,
    lon: f64,
    points: &[PollutionSamplePoint],
    locale: Locale,
) -> LocationInsight {
    if let Some(insight) = region::region_insight(&region::NORTH_AMERICA, lat, lon, points, locale)
    {
        return insight;
    }

    let cities = air_vision_synth::samples::aggregate_by_city(points);
    nearest::nearest_insight(lat, lon, &cities, locale)
}

/// Builds an insight for resolved concentrations with the globe's
/// composite-index tiering.
pub(crate) fn insight_from(
    name: String,
    location: String,
    (lat, lon): (f64, f64),
    concentrations: &PollutantConcentrations,
    locale: Locale,
) -> LocationInsight {
    let snapshot = air_vision_risk::snapshot_from(*concentrations, 0.0, 0.0);
    let narrative = air_vision_risk::build_risk_narrative(&snapshot, TieringPolicy::ByAqi, locale);

    LocationInsight {
        name,
        location,
        lat,
        lon,
        no2: round_to(concentrations.no2, 1),
        ozone: round_to(concentrations.o3, 1),
        pm: round_to(concentrations.pm25, 1),
        aqi: snapshot.aqi,
        risk_narrative: narrative.summary,
        vulnerable_profiles: narrative.vulnerable_profiles,
        sources: data_sources(),
        region: None,
        region_insights: None,
    }
}

pub(crate) fn data_sources() -> Vec<String> {
    DATA_SOURCES.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use air_vision_air_quality_models::Pollutant;
    use air_vision_synth::samples::generate_samples;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn montreal_click_takes_the_regional_path() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = generate_samples(0, &mut rng);

        let insight = surface_insight(45.50, -73.57, &points, Locale::En);

        assert_eq!(insight.region.as_deref(), Some("north-america"));
        let region = insight.region_insights.expect("region insights");
        assert_eq!(region.disease_probabilities.len(), 4);
        assert_eq!(region.key_highlights.len(), 3);
    }

    #[test]
    fn click_outside_region_uses_nearest_city() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = generate_samples(0, &mut rng);

        // Central London
        let insight = surface_insight(51.5, -0.12, &points, Locale::En);

        assert!(insight.region.is_none());
        assert!(insight.location.starts_with("Near 51.5"));
        assert_eq!(insight.sources.len(), 3);
    }

    #[test]
    fn region_without_samples_falls_through_to_nearest() {
        let points = vec![PollutionSamplePoint {
            lat: 35.6762,
            lon: 139.6503,
            pollutant: Pollutant::Pm,
            intensity: 0.5,
            name: "Tokyo".to_string(),
        }];

        let insight = surface_insight(45.50, -73.57, &points, Locale::En);

        assert!(insight.region.is_none());
        assert!((insight.pm - 45.0).abs() < 1e-9);
    }

    #[test]
    fn empty_sample_set_yields_unavailable_insight() {
        let insight = surface_insight(10.0, 10.0, &[], Locale::En);

        assert_eq!(insight.name, "Custom Location");
        assert_eq!(insight.aqi, 0);
        assert!(insight.risk_narrative.starts_with("Data unavailable"));
    }
}
