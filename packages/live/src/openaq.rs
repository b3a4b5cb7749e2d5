//! `OpenAQ` latest-measurement client.
//!
//! See <https://docs.openaq.org/>
//!
//! Only the first measurement of the nearest location is used, as the
//! ground-truth pm2.5 value.

use crate::lenient_number;

/// Query parameters for a coordinate.
#[must_use]
pub fn build_query(
    lat: f64,
    lon: f64,
    radius_m: u32,
    parameter: &str,
    cache_buster: i64,
) -> Vec<(String, String)> {
    vec![
        ("coordinates".to_string(), format!("{lat},{lon}")),
        ("radius".to_string(), radius_m.to_string()),
        ("limit".to_string(), "1".to_string()),
        ("parameter".to_string(), parameter.to_string()),
        ("_".to_string(), cache_buster.to_string()),
    ]
}

/// Extracts `results[0].measurements[0].value`, if numeric.
#[must_use]
pub fn parse_response(body: &serde_json::Value) -> Option<f64> {
    lenient_number(&body["results"][0]["measurements"][0]["value"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_first_measurement() {
        let body = json!({
            "results": [{
                "location": "Montreal - Station 3",
                "measurements": [
                    { "parameter": "pm25", "value": 11.2, "unit": "µg/m³" },
                    { "parameter": "pm25", "value": 99.0, "unit": "µg/m³" }
                ]
            }]
        });
        assert_eq!(parse_response(&body), Some(11.2));
    }

    #[test]
    fn empty_results_are_absent() {
        assert_eq!(parse_response(&json!({ "results": [] })), None);
        assert_eq!(parse_response(&json!({})), None);
        assert_eq!(
            parse_response(&json!({ "results": [{ "measurements": [{ "value": "n/a" }] }] })),
            None
        );
    }

    #[test]
    fn query_carries_coordinate_pair() {
        let query = build_query(48.8566, 2.3522, 50_000, "pm25", 1);
        assert_eq!(query[0], ("coordinates".to_string(), "48.8566,2.3522".to_string()));
        assert!(query.contains(&("radius".to_string(), "50000".to_string())));
    }
}
