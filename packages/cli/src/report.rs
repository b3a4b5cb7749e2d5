//! Plain-text rendering of insights, snapshots and settings.

use std::path::Path;

use air_vision_air_quality_models::{PollutionSamplePoint, RiskNarrative, SnapshotOrigin};
use air_vision_assistant::settings::Settings;
use air_vision_live::fetcher::FetchOutcome;
use air_vision_locate_models::LocationInsight;
use air_vision_synth::intensity_to_concentration;

pub fn print_samples(points: &[&PollutionSamplePoint]) {
    println!(
        "{:<14} {:>9} {:>10} {:<6} {:>9} {:>8}",
        "City", "Lat", "Lon", "Layer", "Intensity", "µg/m³"
    );
    for point in points {
        println!(
            "{:<14} {:>9.4} {:>10.4} {:<6} {:>9.3} {:>8.1}",
            point.name,
            point.lat,
            point.lon,
            point.pollutant,
            point.intensity,
            intensity_to_concentration(point.intensity, point.pollutant)
        );
    }
    println!();
    println!("{} points", points.len());
}

pub fn print_insight(insight: &LocationInsight) {
    println!();
    println!("{} - {}", insight.name, insight.location);
    println!(
        "  NO₂ {:.1}  O₃ {:.1}  PM2.5 {:.1}  AQI {}",
        insight.no2, insight.ozone, insight.pm, insight.aqi
    );
    println!("  {}", insight.risk_narrative);
    println!("  {}", insight.vulnerable_profiles);

    if let Some(region) = &insight.region_insights {
        println!();
        for line in region
            .disease_probabilities
            .iter()
            .chain(&region.key_highlights)
        {
            println!("  - {line}");
        }
    }

    if !insight.sources.is_empty() {
        println!();
        println!("  Sources: {}", insight.sources.join(", "));
    }
}

pub fn print_snapshot(outcome: &FetchOutcome, narrative: &RiskNarrative) {
    let s = &outcome.snapshot;
    println!();
    println!(
        "NO₂ {:.1} µg/m³  PM2.5 {:.1} µg/m³  O₃ {:.1} µg/m³",
        s.no2, s.pm25, s.o3
    );
    println!(
        "Humidity {:.0}%  Wind {:.1} m/s  AQI {}",
        s.humidity, s.wind_speed, s.aqi
    );
    println!();
    println!("{}", air_vision_risk::narrative::assessment_line(narrative));
    println!("{}", narrative.vulnerable_profiles);
    println!();
    match outcome.origin {
        SnapshotOrigin::Live => println!("Live data ({})", outcome.fetched_at),
        SnapshotOrigin::Synthetic => println!("Estimated data (live data disabled)"),
        SnapshotOrigin::Degraded => println!("Estimated data (live providers unavailable)"),
    }
}

pub fn print_settings(settings: &Settings, path: &Path) {
    println!("Settings ({})", path.display());
    println!("  live data:     {}", settings.live_data);
    println!("  notifications: {}", settings.notifications);
    println!("  theme:         {}", settings.theme);
    println!("  locale:        {}", settings.locale);
}
