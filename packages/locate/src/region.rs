//! Regional aggregation.
//!
//! A click inside a [`Region`]'s bounding box averages the synthesized
//! concentration of every sample inside the same box instead of picking a
//! single city.

use air_vision_air_quality_models::{
    Locale, Pollutant, PollutantConcentrations, PollutionSamplePoint, WHO_LIMITS,
};
use air_vision_locate_models::{LocationInsight, RegionInsights};
use air_vision_risk::advice::DiseaseProbabilities;
use air_vision_synth::intensity_to_concentration;

use crate::{data_sources, insight_from};

/// An inclusive latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// Whether `(lat, lon)` lies inside the box, edges included.
    #[must_use]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat) && (self.lon_min..=self.lon_max).contains(&lon)
    }
}

/// A named region with its own click handling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// Identifier reported in [`LocationInsight::region`].
    pub id: &'static str,
    pub name: &'static str,
    pub bounds: BoundingBox,
}

pub const NORTH_AMERICA: Region = Region {
    id: "north-america",
    name: "North America",
    bounds: BoundingBox {
        lat_min: 5.0,
        lat_max: 83.0,
        lon_min: -168.0,
        lon_max: -52.0,
    },
};

/// Averages the synthesized concentration per pollutant over the samples
/// inside `bounds`.
///
/// Returns `None` when no sample lies inside. A pollutant with no samples
/// averages to 0.
#[must_use]
pub fn regional_average(
    bounds: &BoundingBox,
    points: &[PollutionSamplePoint],
) -> Option<PollutantConcentrations> {
    let mut sums = [0.0_f64; 3];
    let mut counts = [0_u32; 3];

    for point in points.iter().filter(|p| bounds.contains(p.lat, p.lon)) {
        let slot = slot(point.pollutant);
        sums[slot] += intensity_to_concentration(point.intensity, point.pollutant);
        counts[slot] += 1;
    }

    if counts.iter().all(|&c| c == 0) {
        return None;
    }

    let average = |slot: usize| {
        if counts[slot] == 0 {
            0.0
        } else {
            sums[slot] / f64::from(counts[slot])
        }
    };

    Some(PollutantConcentrations {
        no2: average(slot(Pollutant::No2)),
        pm25: average(slot(Pollutant::Pm)),
        o3: average(slot(Pollutant::Ozone)),
    })
}

const fn slot(pollutant: Pollutant) -> usize {
    match pollutant {
        Pollutant::No2 => 0,
        Pollutant::Ozone => 1,
        Pollutant::Pm => 2,
    }
}

/// Builds the regional insight for a click, or `None` when the click is
/// outside `region` or no sample falls inside it.
#[must_use]
pub fn region_insight(
    region: &Region,
    lat: f64,
    lon: f64,
    points: &[PollutionSamplePoint],
    locale: Locale,
) -> Option<LocationInsight> {
    if !region.bounds.contains(lat, lon) {
        return None;
    }
    let averages = regional_average(&region.bounds, points)?;

    log::debug!(
        "Region {} click at ({lat}, {lon}): {averages:?}",
        region.id
    );

    let location = match locale {
        Locale::En => format!("{} zone ({lat:.1}°, {lon:.1}°)", region.name),
        Locale::Fr => format!("Zone {} ({lat:.1}°, {lon:.1}°)", region.name),
    };
    let mut insight = insight_from(
        region.name.to_string(),
        location,
        (lat, lon),
        &averages,
        locale,
    );

    let probabilities = DiseaseProbabilities::from_averages(insight.aqi, &averages);
    insight.region = Some(region.id.to_string());
    insight.region_insights = Some(RegionInsights {
        summary: insight.risk_narrative.clone(),
        disease_probabilities: probabilities.lines(),
        key_highlights: key_highlights(&averages),
        sources: data_sources(),
    });

    Some(insight)
}

fn key_highlights(averages: &PollutantConcentrations) -> Vec<String> {
    vec![
        format!(
            "Avg NO₂ {:.1} µg/m³ (WHO 24h < {}).",
            averages.no2, WHO_LIMITS.no2
        ),
        format!(
            "Avg PM2.5 {:.1} µg/m³ (WHO 24h < {}).",
            averages.pm25, WHO_LIMITS.pm25
        ),
        format!(
            "Avg O₃ {:.1} µg/m³ (WHO seasonal peak < {}).",
            averages.o3, WHO_LIMITS.o3
        ),
    ]
}
