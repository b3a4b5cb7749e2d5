#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Synthetic air quality data.
//!
//! Two synthesis policies coexist:
//!
//! - **Intensity to concentration** ([`intensity_to_concentration`]):
//!   scales a `[0, 1]` sample intensity by a fixed per-pollutant multiplier.
//!   Used for the globe's [`samples`] grid.
//! - **Coordinate-seeded fallback** ([`fallback_snapshot`]): derives a
//!   stable pseudo-random seed from a coordinate so any point on Earth yields
//!   the same plausible snapshot every time, with no external randomness.

pub mod cities;
pub mod samples;

use air_vision_air_quality_models::{AqiSnapshot, Pollutant, PollutantConcentrations};

/// Concentration (µg/m³) corresponding to intensity 1.0 for a pollutant.
#[must_use]
pub const fn multiplier(pollutant: Pollutant) -> f64 {
    match pollutant {
        Pollutant::No2 => 80.0,
        Pollutant::Ozone => 120.0,
        Pollutant::Pm => 90.0,
    }
}

/// Converts a sample intensity to a concentration, rounded to one decimal.
#[must_use]
pub fn intensity_to_concentration(intensity: f64, pollutant: Pollutant) -> f64 {
    round_to(intensity * multiplier(pollutant), 1)
}

/// Rounds half away from zero to `decimals` places.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Deterministic seed in `[0, 1)` for a coordinate.
///
/// Each product and the sum round separately; no fused multiply-add.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn coordinate_seed(lat: f64, lon: f64) -> f64 {
    (lat * 12.9898 + lon * 78.233).sin().abs() % 1.0
}

/// A plausible snapshot for a coordinate with no backing data.
///
/// Each field is a linear map of [`coordinate_seed`] into its range:
/// pm2.5 5-40, no2 8-38, o3 30-80, humidity 40-90, wind 1-7 m/s.
#[must_use]
#[allow(clippy::suboptimal_flops)]
pub fn fallback_snapshot(lat: f64, lon: f64) -> AqiSnapshot {
    let seed = coordinate_seed(lat, lon);

    let concentrations = PollutantConcentrations {
        no2: round_to(8.0 + seed * 30.0, 1),
        pm25: round_to(5.0 + seed * 35.0, 1),
        o3: round_to(30.0 + seed * 50.0, 1),
    };
    let humidity = round_to(40.0 + seed * 50.0, 0);
    let wind_speed = round_to(1.0 + seed * 6.0, 1);

    log::debug!("Fallback snapshot for ({lat}, {lon}) with seed {seed:.4}");

    air_vision_risk::snapshot_from(concentrations, humidity, wind_speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::suboptimal_flops)]
    fn seed_rounds_each_step() {
        for (lat, lon) in [(45.5, -73.57), (48.8566, 2.3522), (-33.87, 151.21), (0.1, 0.2)] {
            let sum: f64 = lat * 12.9898 + lon * 78.233;
            let expected = sum.sin().abs() % 1.0;
            assert_eq!(coordinate_seed(lat, lon).to_bits(), expected.to_bits());
        }
    }

    #[test]
    #[allow(clippy::suboptimal_flops)]
    fn fallback_maps_seed_into_ranges() {
        let (lat, lon) = (48.8566, 2.3522);
        let seed = coordinate_seed(lat, lon);
        let pm25 = 5.0 + seed * 35.0;
        let s = fallback_snapshot(lat, lon);
        assert!((s.pm25 - (pm25 * 10.0).round() / 10.0).abs() < 1e-9);
        assert!((5.0..=40.0).contains(&s.pm25));
        assert!((40.0..=90.0).contains(&s.humidity));
    }

    #[test]
    fn intensity_scales_by_pollutant() {
        assert!((intensity_to_concentration(0.5, Pollutant::No2) - 40.0).abs() < 1e-9);
        assert!((intensity_to_concentration(0.5, Pollutant::Ozone) - 60.0).abs() < 1e-9);
        assert!((intensity_to_concentration(0.5, Pollutant::Pm) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn intensity_rounds_to_one_decimal() {
        // 0.333 * 80 = 26.64
        assert!((intensity_to_concentration(0.333, Pollutant::No2) - 26.6).abs() < 1e-9);
    }

    #[test]
    fn fallback_is_deterministic() {
        let a = fallback_snapshot(45.5019, -73.5674);
        let b = fallback_snapshot(45.5019, -73.5674);
        assert_eq!(a, b);
        assert_eq!(format!("{a:?}"), format!("{b:?}"));
    }

    #[test]
    fn fallback_values_stay_in_range() {
        for lat in [-89.0, -45.5, 0.0, 12.3, 48.8566, 89.9] {
            for lon in [-179.0, -73.5674, 0.0, 2.3522, 139.65, 179.9] {
                let s = fallback_snapshot(lat, lon);
                assert!((5.0..=40.0).contains(&s.pm25), "{s:?}");
                assert!((8.0..=38.0).contains(&s.no2), "{s:?}");
                assert!((30.0..=80.0).contains(&s.o3), "{s:?}");
                assert!((40.0..=90.0).contains(&s.humidity), "{s:?}");
                assert!((1.0..=7.0).contains(&s.wind_speed), "{s:?}");
                assert!(s.aqi <= 300);
            }
        }
    }

    #[test]
    fn origin_seed_is_zero() {
        assert!(coordinate_seed(0.0, 0.0).abs() < f64::EPSILON);
        let s = fallback_snapshot(0.0, 0.0);
        assert!((s.pm25 - 5.0).abs() < 1e-9);
        assert!((s.no2 - 8.0).abs() < 1e-9);
        assert!((s.o3 - 30.0).abs() < 1e-9);
        // o3 30/60 = 0.5 -> 80, pm25 5/15 = 0.333 -> 53, no2 8/25 = 0.32 -> 51
        assert_eq!(s.aqi, 80);
    }
}
