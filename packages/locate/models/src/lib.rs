#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Location insight types.
//!
//! A [`LocationInsight`] is built fresh for every globe click and replaced
//! wholesale on the next one. Pollutant values use the layer display names
//! (`NO2`, `Ozone`, `PM`) on the wire.

use serde::{Deserialize, Serialize};

/// Everything the detail panel shows for a clicked location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInsight {
    /// Short title, e.g. a city name or `Custom Location`.
    pub name: String,
    /// Human-readable description of where the values come from.
    pub location: String,
    pub lat: f64,
    pub lon: f64,
    /// NO2 (µg/m³), one decimal.
    #[serde(rename = "NO2")]
    pub no2: f64,
    /// O3 (µg/m³), one decimal.
    #[serde(rename = "Ozone")]
    pub ozone: f64,
    /// PM2.5 (µg/m³), one decimal.
    #[serde(rename = "PM")]
    pub pm: f64,
    pub aqi: u16,
    pub risk_narrative: String,
    pub vulnerable_profiles: String,
    /// Data sources credited for the values. Empty when no data exists.
    #[serde(default)]
    pub sources: Vec<String>,
    /// Region identifier when the regional path produced this insight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_insights: Option<RegionInsights>,
}

/// Aggregate detail for a regional click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionInsights {
    pub summary: String,
    /// One line per condition, e.g. `Asthma: 45% (High NO₂ + PM2.5).`
    pub disease_probabilities: Vec<String>,
    pub key_highlights: Vec<String>,
    pub sources: Vec<String>,
}

/// A resolved location for the health assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
    /// Display label, e.g. `Paris, France`.
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insight() -> LocationInsight {
        LocationInsight {
            name: "Custom Location".to_string(),
            location: "Lat 1.0°, Lon 2.0°".to_string(),
            lat: 1.0,
            lon: 2.0,
            no2: 0.0,
            ozone: 0.0,
            pm: 0.0,
            aqi: 0,
            risk_narrative: "n".to_string(),
            vulnerable_profiles: "p".to_string(),
            sources: Vec::new(),
            region: None,
            region_insights: None,
        }
    }

    #[test]
    fn pollutants_use_layer_names_on_the_wire() {
        let value = serde_json::to_value(insight()).unwrap();
        assert!(value.get("NO2").is_some());
        assert!(value.get("Ozone").is_some());
        assert!(value.get("PM").is_some());
        assert!(value.get("riskNarrative").is_some());
        assert!(value.get("vulnerableProfiles").is_some());
    }

    #[test]
    fn region_fields_are_omitted_when_absent() {
        let value = serde_json::to_value(insight()).unwrap();
        assert!(value.get("region").is_none());
        assert!(value.get("regionInsights").is_none());
    }

    #[test]
    fn region_insights_are_camel_case() {
        let mut with_region = insight();
        with_region.region = Some("north-america".to_string());
        with_region.region_insights = Some(RegionInsights {
            summary: "s".to_string(),
            disease_probabilities: vec!["a".to_string()],
            key_highlights: Vec::new(),
            sources: Vec::new(),
        });
        let value = serde_json::to_value(&with_region).unwrap();
        assert_eq!(value["region"], "north-america");
        assert_eq!(value["regionInsights"]["diseaseProbabilities"][0], "a");
        assert!(value["regionInsights"].get("keyHighlights").is_some());
    }
}
