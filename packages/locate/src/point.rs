//! Sample-point clicks.

use air_vision_air_quality_models::{Locale, PollutionSamplePoint};
use air_vision_locate_models::LocationInsight;
use air_vision_synth::samples::CityAggregate;

use crate::insight_from;

/// Builds the insight for a clicked sample marker from its city's
/// aggregate.
///
/// Returns `None` when the marker's city has no aggregate.
#[must_use]
pub fn point_insight(
    clicked: &PollutionSamplePoint,
    cities: &[CityAggregate],
    locale: Locale,
) -> Option<LocationInsight> {
    let city = cities.iter().find(|c| c.name == clicked.name)?;

    let location = match locale {
        Locale::En => format!("{} (satellite + ground data)", city.name),
        Locale::Fr => format!("{} (données satellite + sol)", city.name),
    };

    Some(insight_from(
        city.name.clone(),
        location,
        (city.lat, city.lon),
        &city.concentrations,
        locale,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use air_vision_air_quality_models::Pollutant;
    use air_vision_synth::samples::aggregate_by_city;

    fn sample(name: &str, pollutant: Pollutant, intensity: f64) -> PollutionSamplePoint {
        PollutionSamplePoint {
            lat: 40.7128,
            lon: -74.006,
            pollutant,
            intensity,
            name: name.to_string(),
        }
    }

    #[test]
    fn uses_the_whole_city_aggregate() {
        let points = vec![
            sample("New York", Pollutant::No2, 0.3),
            sample("New York", Pollutant::Ozone, 0.5),
            sample("New York", Pollutant::Pm, 0.1),
        ];
        let cities = aggregate_by_city(&points);

        let insight = point_insight(&points[1], &cities, Locale::En).unwrap();

        assert_eq!(insight.name, "New York");
        assert_eq!(insight.location, "New York (satellite + ground data)");
        assert!((insight.no2 - 24.0).abs() < 1e-9);
        assert!((insight.ozone - 60.0).abs() < 1e-9);
        assert!((insight.pm - 9.0).abs() < 1e-9);
        // max(0.96, 0.6, 1.0) -> 160
        assert_eq!(insight.aqi, 160);
        assert!(insight.risk_narrative.starts_with("High risk"));
        assert_eq!(insight.sources, vec!["NASA TEMPO", "OpenAQ", "Open-Meteo"]);
    }

    #[test]
    fn unknown_city_yields_none() {
        let cities = aggregate_by_city(&[sample("London", Pollutant::No2, 0.3)]);
        assert!(point_insight(&sample("Tokyo", Pollutant::No2, 0.3), &cities, Locale::En).is_none());
    }
}
