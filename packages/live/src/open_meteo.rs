//! Open-Meteo air quality client.
//!
//! See <https://open-meteo.com/en/docs/air-quality-api>
//!
//! The response carries hourly arrays indexed by `hourly.time`; the last
//! index is taken as the current reading.

use crate::lenient_number;

/// The latest hourly values from an Open-Meteo response. Any field may be
/// absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AirQualityReading {
    /// Modelled pm2.5 (µg/m³).
    pub pm25: Option<f64>,
    /// NO2 (µg/m³).
    pub no2: Option<f64>,
    /// O3 (µg/m³).
    pub o3: Option<f64>,
    /// Relative humidity at 2 m (%).
    pub humidity: Option<f64>,
    /// Wind speed at 10 m.
    pub wind_speed: Option<f64>,
}

/// Query parameters for a coordinate.
///
/// `cache_buster` is appended as `_` so intermediaries never serve a stale
/// response.
#[must_use]
pub fn build_query(lat: f64, lon: f64, hourly: &[String], cache_buster: i64) -> Vec<(String, String)> {
    vec![
        ("latitude".to_string(), lat.to_string()),
        ("longitude".to_string(), lon.to_string()),
        ("hourly".to_string(), hourly.join(",")),
        ("_".to_string(), cache_buster.to_string()),
    ]
}

/// Extracts the latest hourly values. Never fails: unexpected shapes yield
/// absent fields.
#[must_use]
pub fn parse_response(body: &serde_json::Value) -> AirQualityReading {
    let hourly = &body["hourly"];
    let latest = hourly["time"]
        .as_array()
        .map_or(1, Vec::len)
        .saturating_sub(1);

    let field = |name: &str| lenient_number(&hourly[name][latest]);

    AirQualityReading {
        pm25: field("pm2_5"),
        no2: field("nitrogen_dioxide"),
        o3: field("ozone"),
        humidity: field("relativehumidity_2m"),
        wind_speed: field("wind_speed_10m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn takes_last_hourly_index() {
        let body = json!({
            "hourly": {
                "time": ["2024-10-01T00:00", "2024-10-01T01:00", "2024-10-01T02:00"],
                "pm2_5": [1.0, 2.0, 9.5],
                "nitrogen_dioxide": [3.0, 4.0, 21.3],
                "ozone": [50.0, 51.0, 48.0],
                "relativehumidity_2m": [70, 71, 72],
                "wind_speed_10m": ["2.0", "2.5", "3.4"]
            }
        });
        let reading = parse_response(&body);
        assert_eq!(reading.pm25, Some(9.5));
        assert_eq!(reading.no2, Some(21.3));
        assert_eq!(reading.o3, Some(48.0));
        assert_eq!(reading.humidity, Some(72.0));
        assert_eq!(reading.wind_speed, Some(3.4));
    }

    #[test]
    fn missing_time_uses_index_zero() {
        let body = json!({ "hourly": { "ozone": [40.0, 99.0] } });
        let reading = parse_response(&body);
        assert_eq!(reading.o3, Some(40.0));
        assert_eq!(reading.pm25, None);
    }

    #[test]
    fn garbage_yields_empty_reading() {
        assert_eq!(parse_response(&json!("oops")), AirQualityReading::default());
        assert_eq!(
            parse_response(&json!({ "hourly": { "time": [], "ozone": null } })),
            AirQualityReading::default()
        );
        let nulls = json!({ "hourly": { "time": ["t"], "pm2_5": [null], "ozone": ["n/a"] } });
        assert_eq!(parse_response(&nulls), AirQualityReading::default());
    }

    #[test]
    fn query_joins_hourly_fields() {
        let hourly = vec!["pm2_5".to_string(), "ozone".to_string()];
        let query = build_query(45.5, -73.5, &hourly, 17);
        assert!(query.contains(&("hourly".to_string(), "pm2_5,ozone".to_string())));
        assert!(query.contains(&("latitude".to_string(), "45.5".to_string())));
        assert!(query.contains(&("_".to_string(), "17".to_string())));
    }
}
