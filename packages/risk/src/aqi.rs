//! Composite air quality index.
//!
//! The index is a single blended scalar: the largest ratio of a
//! concentration to its WHO limit, scaled by [`AQI_SCALE`] and capped at
//! [`AQI_MAX`]. The worst pollutant alone decides the value.

use air_vision_air_quality_models::{
    AqiSnapshot, PollutantConcentrations, WHO_LIMITS, WhoLimits,
};

/// Index points per unit of WHO-limit ratio.
pub const AQI_SCALE: f64 = 160.0;

/// Upper bound of the composite index.
pub const AQI_MAX: u16 = 300;

/// Computes the composite index against the process-wide WHO table.
#[must_use]
pub fn compute_aqi(concentrations: &PollutantConcentrations) -> u16 {
    compute_aqi_with(&WHO_LIMITS, concentrations)
}

/// Computes the composite index against an explicit limit table.
///
/// Returns 0 when any ratio is NaN or infinite (e.g. a zero limit or a
/// malformed concentration).
#[must_use]
pub fn compute_aqi_with(limits: &WhoLimits, concentrations: &PollutantConcentrations) -> u16 {
    let ratios = limits.ratios(concentrations);

    if ratios.iter().any(|r| !r.is_finite()) {
        log::debug!("Non-finite pollutant ratio {ratios:?}, coercing AQI to 0");
        return 0;
    }

    let dominant = ratios.into_iter().fold(0.0_f64, f64::max);
    let scaled = (dominant * AQI_SCALE).min(f64::from(AQI_MAX)).round();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let aqi = scaled as u16;
    aqi
}

/// Builds an [`AqiSnapshot`], deriving its `aqi` from the concentrations.
#[must_use]
pub fn snapshot_from(
    concentrations: PollutantConcentrations,
    humidity: f64,
    wind_speed: f64,
) -> AqiSnapshot {
    AqiSnapshot {
        no2: concentrations.no2,
        pm25: concentrations.pm25,
        o3: concentrations.o3,
        humidity,
        wind_speed,
        aqi: compute_aqi(&concentrations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conc(no2: f64, pm25: f64, o3: f64) -> PollutantConcentrations {
        PollutantConcentrations { no2, pm25, o3 }
    }

    fn reference(c: &PollutantConcentrations) -> u16 {
        let dominant = (c.no2 / 25.0)
            .max(c.pm25 / 15.0)
            .max(c.o3 / 60.0)
            .max(0.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let v = (300.0_f64.min(160.0 * dominant)).round() as u16;
        v
    }

    #[test]
    fn zero_concentrations_give_zero() {
        assert_eq!(compute_aqi(&conc(0.0, 0.0, 0.0)), 0);
    }

    #[test]
    fn dominant_pollutant_drives_index() {
        // pm25 ratio 2.0 beats no2 1.0 and o3 0.5
        assert_eq!(compute_aqi(&conc(25.0, 30.0, 30.0)), 300);
        assert_eq!(compute_aqi(&conc(25.0, 0.0, 0.0)), 160);
        assert_eq!(compute_aqi(&conc(0.0, 0.0, 30.0)), 80);
    }

    #[test]
    fn index_is_capped() {
        assert_eq!(compute_aqi(&conc(1_000.0, 0.0, 0.0)), AQI_MAX);
    }

    #[test]
    fn negative_values_floor_at_zero() {
        assert_eq!(compute_aqi(&conc(-10.0, -3.0, -1.0)), 0);
    }

    #[test]
    fn matches_closed_form_over_a_grid() {
        for no2 in [0.0, 3.3, 12.5, 24.9, 40.0, 80.0] {
            for pm25 in [0.0, 5.0, 14.99, 22.7, 90.0] {
                for o3 in [0.0, 30.0, 59.0, 61.5, 120.0] {
                    let c = conc(no2, pm25, o3);
                    let aqi = compute_aqi(&c);
                    assert_eq!(aqi, reference(&c), "{c:?}");
                    assert!(aqi <= AQI_MAX);
                }
            }
        }
    }

    #[test]
    fn non_finite_inputs_coerce_to_zero() {
        assert_eq!(compute_aqi(&conc(f64::NAN, 10.0, 10.0)), 0);
        assert_eq!(compute_aqi(&conc(f64::INFINITY, 0.0, 0.0)), 0);

        let broken = WhoLimits {
            no2: 0.0,
            pm25: 15.0,
            o3: 60.0,
        };
        assert_eq!(compute_aqi_with(&broken, &conc(0.0, 10.0, 10.0)), 0);
        assert_eq!(compute_aqi_with(&broken, &conc(5.0, 10.0, 10.0)), 0);
    }

    #[test]
    fn snapshot_derives_index() {
        let snapshot = snapshot_from(conc(12.5, 0.0, 0.0), 55.0, 3.2);
        assert_eq!(snapshot.aqi, 80);
        assert!((snapshot.wind_speed - 3.2).abs() < f64::EPSILON);
    }
}
