//! Nearest-city resolution for clicks outside any region.

use air_vision_air_quality_models::Locale;
use air_vision_locate_models::LocationInsight;
use air_vision_risk::locale::{unavailable_narrative, unavailable_profiles};
use air_vision_synth::samples::CityAggregate;
use geo::{Distance, Haversine, Point};

use crate::insight_from;

/// Finds the city closest to `(lat, lon)` by great-circle distance.
///
/// Ties keep the first city encountered. Returns the city and its distance
/// in meters, or `None` when `cities` is empty.
#[must_use]
pub fn nearest_city(lat: f64, lon: f64, cities: &[CityAggregate]) -> Option<(&CityAggregate, f64)> {
    let origin = Point::new(lon, lat);

    cities
        .iter()
        .map(|city| (city, Haversine.distance(origin, Point::new(city.lon, city.lat))))
        .fold(None, |closest, (city, distance)| match closest {
            Some((_, best)) if distance >= best => closest,
            _ => Some((city, distance)),
        })
}

/// Builds the insight for a click resolved to its nearest city.
///
/// With no cities at all this returns a zero-valued insight carrying the
/// "data unavailable" narrative.
#[must_use]
pub fn nearest_insight(
    lat: f64,
    lon: f64,
    cities: &[CityAggregate],
    locale: Locale,
) -> LocationInsight {
    let Some((city, distance)) = nearest_city(lat, lon, cities) else {
        log::debug!("No city data for click at ({lat}, {lon})");
        return unavailable_insight(lat, lon, locale);
    };

    log::debug!(
        "Click at ({lat}, {lon}) resolved to {} ({:.0} km)",
        city.name,
        distance / 1000.0
    );

    let location = match locale {
        Locale::En => format!("Near {:.1}°, {:.1}°", city.lat, city.lon),
        Locale::Fr => format!("Près de {:.1}°, {:.1}°", city.lat, city.lon),
    };
    insight_from(
        custom_location_name(locale).to_string(),
        location,
        (lat, lon),
        &city.concentrations,
        locale,
    )
}

/// The zero-valued insight for a point with no backing data.
#[must_use]
pub fn unavailable_insight(lat: f64, lon: f64, locale: Locale) -> LocationInsight {
    LocationInsight {
        name: custom_location_name(locale).to_string(),
        location: format!("Lat {lat:.1}°, Lon {lon:.1}°"),
        lat,
        lon,
        no2: 0.0,
        ozone: 0.0,
        pm: 0.0,
        aqi: 0,
        risk_narrative: unavailable_narrative(locale).to_string(),
        vulnerable_profiles: unavailable_profiles(locale).to_string(),
        sources: Vec::new(),
        region: None,
        region_insights: None,
    }
}

const fn custom_location_name(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Custom Location",
        Locale::Fr => "Lieu personnalisé",
    }
}
