//! The synthetic per-city sample grid behind the globe overlay.
//!
//! Every city gets one [`PollutionSamplePoint`] per pollutant layer. The
//! grid is regenerated wholesale whenever the time offset changes; points
//! are never edited in place.

use air_vision_air_quality_models::{Pollutant, PollutantConcentrations, PollutionSamplePoint};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cities::{CITIES, City};
use crate::intensity_to_concentration;

/// Lowest base intensity drawn for a sample.
const BASE_INTENSITY_MIN: f64 = 0.3;

/// Width of the uniform base intensity range.
const BASE_INTENSITY_SPREAD: f64 = 0.4;

/// Intensity added per day of time offset.
const INTENSITY_PER_DAY: f64 = 0.02;

/// Generates samples for the built-in city table.
pub fn generate_samples<R: Rng + ?Sized>(
    time_offset: i32,
    rng: &mut R,
) -> Vec<PollutionSamplePoint> {
    generate_samples_for(CITIES, time_offset, rng)
}

/// Generates one sample per city and pollutant layer.
///
/// `intensity = min(1, 0.3 + U[0,1) * 0.4 + time_offset * 0.02)`, floored
/// at zero for large negative offsets.
pub fn generate_samples_for<R: Rng + ?Sized>(
    cities: &[City],
    time_offset: i32,
    rng: &mut R,
) -> Vec<PollutionSamplePoint> {
    let variation = f64::from(time_offset) * INTENSITY_PER_DAY;

    cities
        .iter()
        .flat_map(|city| {
            Pollutant::all()
                .iter()
                .map(move |&pollutant| (city, pollutant))
        })
        .map(|(city, pollutant)| {
            let base = BASE_INTENSITY_MIN + rng.gen_range(0.0..BASE_INTENSITY_SPREAD);
            PollutionSamplePoint {
                lat: city.lat,
                lon: city.lon,
                pollutant,
                intensity: (base + variation).clamp(0.0, 1.0),
                name: city.name.to_string(),
            }
        })
        .collect()
}

/// Keeps the points whose layer is selected; an empty selection keeps all.
#[must_use]
pub fn filter_layers<'a>(
    points: &'a [PollutionSamplePoint],
    layers: &[Pollutant],
) -> Vec<&'a PollutionSamplePoint> {
    points
        .iter()
        .filter(|p| layers.is_empty() || layers.contains(&p.pollutant))
        .collect()
}

/// A city's synthesized concentration per layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityAggregate {
    /// City name.
    pub name: String,
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lon: f64,
    /// Concentrations derived from the city's samples; missing layers are 0.
    pub concentrations: PollutantConcentrations,
}

/// Groups samples by city name, in first-seen order.
///
/// When a city has several samples for one layer the last one wins.
#[must_use]
pub fn aggregate_by_city(points: &[PollutionSamplePoint]) -> Vec<CityAggregate> {
    let mut aggregates: Vec<CityAggregate> = Vec::new();

    for point in points {
        let idx = match aggregates.iter().position(|a| a.name == point.name) {
            Some(idx) => idx,
            None => {
                aggregates.push(CityAggregate {
                    name: point.name.clone(),
                    lat: point.lat,
                    lon: point.lon,
                    concentrations: PollutantConcentrations::default(),
                });
                aggregates.len() - 1
            }
        };

        let value = intensity_to_concentration(point.intensity, point.pollutant);
        let c = &mut aggregates[idx].concentrations;
        match point.pollutant {
            Pollutant::No2 => c.no2 = value,
            Pollutant::Ozone => c.o3 = value,
            Pollutant::Pm => c.pm25 = value,
        }
    }

    aggregates
}

/// The current sample set and the time offset it was generated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleGrid {
    time_offset: i32,
    points: Vec<PollutionSamplePoint>,
}

impl SampleGrid {
    /// Generates a fresh grid for `time_offset`.
    pub fn generate<R: Rng + ?Sized>(time_offset: i32, rng: &mut R) -> Self {
        Self {
            time_offset,
            points: generate_samples(time_offset, rng),
        }
    }

    /// Replaces the whole grid if `time_offset` differs from the current
    /// one. Returns whether a regeneration happened.
    pub fn ensure_offset<R: Rng + ?Sized>(&mut self, time_offset: i32, rng: &mut R) -> bool {
        if self.time_offset == time_offset {
            return false;
        }
        log::info!(
            "Regenerating sample grid: time offset {} -> {time_offset}",
            self.time_offset
        );
        *self = Self::generate(time_offset, rng);
        true
    }

    /// The offset these points were generated for.
    #[must_use]
    pub const fn time_offset(&self) -> i32 {
        self.time_offset
    }

    /// All sample points.
    #[must_use]
    pub fn points(&self) -> &[PollutionSamplePoint] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn one_point_per_city_and_layer() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = generate_samples(0, &mut rng);
        assert_eq!(points.len(), CITIES.len() * Pollutant::all().len());
        for p in &points {
            assert!((0.3..0.7).contains(&p.intensity), "{p:?}");
        }
    }

    #[test]
    fn positive_offset_raises_and_caps_intensity() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = generate_samples(40, &mut rng);
        assert!(points.iter().all(|p| (p.intensity - 1.0).abs() < f64::EPSILON));
    }

    #[test]
    fn seeded_generation_is_repeatable() {
        let a = generate_samples(3, &mut StdRng::seed_from_u64(42));
        let b = generate_samples(3, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_layer_selection_keeps_everything() {
        let points = generate_samples(0, &mut StdRng::seed_from_u64(1));
        assert_eq!(filter_layers(&points, &[]).len(), points.len());
        let ozone = filter_layers(&points, &[Pollutant::Ozone]);
        assert_eq!(ozone.len(), CITIES.len());
        assert!(ozone.iter().all(|p| p.pollutant == Pollutant::Ozone));
    }

    #[test]
    fn aggregates_keep_city_order_and_layers() {
        let points = vec![
            PollutionSamplePoint {
                lat: 1.0,
                lon: 2.0,
                pollutant: Pollutant::No2,
                intensity: 0.5,
                name: "B".to_string(),
            },
            PollutionSamplePoint {
                lat: 3.0,
                lon: 4.0,
                pollutant: Pollutant::Pm,
                intensity: 0.5,
                name: "A".to_string(),
            },
            PollutionSamplePoint {
                lat: 1.0,
                lon: 2.0,
                pollutant: Pollutant::Ozone,
                intensity: 0.25,
                name: "B".to_string(),
            },
        ];
        let aggregates = aggregate_by_city(&points);
        assert_eq!(aggregates.len(), 2);
        assert_eq!(aggregates[0].name, "B");
        assert!((aggregates[0].concentrations.no2 - 40.0).abs() < 1e-9);
        assert!((aggregates[0].concentrations.o3 - 30.0).abs() < 1e-9);
        assert!(aggregates[0].concentrations.pm25.abs() < f64::EPSILON);
        assert!((aggregates[1].concentrations.pm25 - 45.0).abs() < 1e-9);
    }

    #[test]
    fn grid_regenerates_only_on_new_offset() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut grid = SampleGrid::generate(0, &mut rng);
        let before = grid.clone();
        assert!(!grid.ensure_offset(0, &mut rng));
        assert_eq!(grid, before);
        assert!(grid.ensure_offset(2, &mut rng));
        assert_eq!(grid.time_offset(), 2);
        assert_ne!(grid.points(), before.points());
    }
}
