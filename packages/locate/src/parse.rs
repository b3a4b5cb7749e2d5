//! Location text parsing for the health assistant.

use air_vision_locate_models::Coordinates;

use crate::LocationError;

/// Cities recognised by name when no coordinates are given.
const KNOWN_CITIES: &[(&str, f64, f64, &str)] = &[
    ("paris", 48.8566, 2.3522, "Paris, France"),
    ("montreal", 45.5019, -73.5674, "Montreal, Canada"),
    ("new york", 40.7128, -74.006, "New York, United States"),
];

/// Resolves the assistant's location inputs.
///
/// In order of precedence:
///
/// 1. A non-empty `lat_lon` of the form `lat,lon`. Both parts must be
///    finite numbers. The label is `city` if given, otherwise
///    `Lat x.xx, Lon y.yy`.
/// 2. The previously resolved `fallback` location.
/// 3. A case-insensitive substring match of `city` against the known
///    cities.
///
/// # Errors
///
/// * [`LocationError::InvalidCoordinates`] if `lat_lon` is given but does
///   not hold two finite numbers
/// * [`LocationError::UnknownLocation`] if nothing above matched
pub fn parse_coordinates(
    city: &str,
    lat_lon: &str,
    fallback: Option<&Coordinates>,
) -> Result<Coordinates, LocationError> {
    let city = city.trim();
    let lat_lon = lat_lon.trim();

    if !lat_lon.is_empty() {
        let (lat, lon) = parse_pair(lat_lon).ok_or_else(|| LocationError::InvalidCoordinates {
            input: lat_lon.to_string(),
        })?;
        let label = if city.is_empty() {
            coordinate_label(lat, lon)
        } else {
            city.to_string()
        };
        return Ok(Coordinates { lat, lon, label });
    }

    if let Some(fallback) = fallback {
        let label = if fallback.label.is_empty() {
            coordinate_label(fallback.lat, fallback.lon)
        } else {
            fallback.label.clone()
        };
        return Ok(Coordinates {
            lat: fallback.lat,
            lon: fallback.lon,
            label,
        });
    }

    let needle = city.to_lowercase();
    if !needle.is_empty() {
        for &(key, lat, lon, label) in KNOWN_CITIES {
            if needle.contains(key) {
                return Ok(Coordinates {
                    lat,
                    lon,
                    label: label.to_string(),
                });
            }
        }
    }

    Err(LocationError::UnknownLocation {
        input: city.to_string(),
    })
}

fn parse_pair(text: &str) -> Option<(f64, f64)> {
    let (lat, lon) = text.split_once(',')?;
    let lat = lat.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    let lon = lon.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some((lat, lon))
}

fn coordinate_label(lat: f64, lon: f64) -> String {
    format!("Lat {lat:.2}, Lon {lon:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paris_resolves_by_name() {
        let coords = parse_coordinates("Paris", "", None).unwrap();
        assert!((coords.lat - 48.8566).abs() < f64::EPSILON);
        assert!((coords.lon - 2.3522).abs() < f64::EPSILON);
        assert_eq!(coords.label, "Paris, France");
    }

    #[test]
    fn city_match_is_case_insensitive_substring() {
        let coords = parse_coordinates("downtown MONTREAL", "", None).unwrap();
        assert_eq!(coords.label, "Montreal, Canada");
        let coords = parse_coordinates("New York City", "", None).unwrap();
        assert!((coords.lon + 74.006).abs() < f64::EPSILON);
    }

    #[test]
    fn explicit_coordinates_win() {
        let fallback = Coordinates {
            lat: 1.0,
            lon: 2.0,
            label: "Prior".to_string(),
        };
        let coords = parse_coordinates("Paris", " 10.5 , -20.25 ", Some(&fallback)).unwrap();
        assert!((coords.lat - 10.5).abs() < f64::EPSILON);
        assert!((coords.lon + 20.25).abs() < f64::EPSILON);
        assert_eq!(coords.label, "Paris");
    }

    #[test]
    fn coordinates_without_city_get_a_numeric_label() {
        let coords = parse_coordinates("", "45.5019,-73.5674", None).unwrap();
        assert_eq!(coords.label, "Lat 45.50, Lon -73.57");
    }

    #[test]
    fn malformed_coordinates_are_rejected() {
        for input in ["abc", "45.5", "45.5,", "NaN,1", "1,inf", "1;2"] {
            assert_eq!(
                parse_coordinates("Paris", input, None),
                Err(LocationError::InvalidCoordinates {
                    input: input.to_string()
                }),
                "{input}"
            );
        }
    }

    #[test]
    fn fallback_beats_city_lookup() {
        let fallback = Coordinates {
            lat: 1.0,
            lon: 2.0,
            label: String::new(),
        };
        let coords = parse_coordinates("Paris", "", Some(&fallback)).unwrap();
        assert!((coords.lat - 1.0).abs() < f64::EPSILON);
        assert_eq!(coords.label, "Lat 1.00, Lon 2.00");
    }

    #[test]
    fn unknown_city_is_rejected() {
        assert_eq!(
            parse_coordinates("Atlantis", "", None),
            Err(LocationError::UnknownLocation {
                input: "Atlantis".to_string()
            })
        );
        assert!(parse_coordinates("", "", None).is_err());
    }
}
