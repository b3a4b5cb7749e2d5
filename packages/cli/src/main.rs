#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the air vision toolchain.
//!
//! ```text
//! air_vision samples [--time-offset 0] [--layers NO2,PM]
//! air_vision insight --lat 45.5 --lon -73.57 [--time-offset 0] [--seed 7]
//! air_vision snapshot --lat 48.8566 --lon 2.3522 [--live]
//! air_vision assistant
//! air_vision settings [--live-data true] [--locale fr] ...
//! air_vision serve
//! ```
//!
//! Running `air_vision` with no subcommand enters interactive mode.
//!
//! Uses `indicatif-log-bridge` (via [`air_vision_cli_utils::init_logger`])
//! so that log lines and spinners never fight for the terminal.

mod assistant;
mod report;

use air_vision_air_quality_models::{Locale, TieringPolicy};
use air_vision_assistant::settings::{SettingsPatch, SettingsStore, Theme};
use air_vision_cli_utils::MultiProgress;
use air_vision_live::fetcher::SnapshotFetcher;
use air_vision_live::transport::ReqwestTransport;
use air_vision_server_models::parse_layers;
use air_vision_synth::samples::{filter_layers, generate_samples};
use clap::{Parser, Subcommand};
use dialoguer::Select;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser)]
#[command(name = "air_vision", about = "Air quality risk insights")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the synthetic sample grid
    Samples {
        /// Hours ahead of now
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        time_offset: i32,
        /// Comma-separated layers (NO2, Ozone, PM); all when omitted
        #[arg(long)]
        layers: Option<String>,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Resolve a globe click into a location insight (JSON)
    Insight {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Hours ahead of now
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        time_offset: i32,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Fetch a snapshot and its risk narrative for a coordinate
    Snapshot {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Query live providers regardless of the saved setting
        #[arg(long)]
        live: bool,
    },
    /// Run the health assistant questionnaire
    Assistant,
    /// Show or change settings
    Settings {
        #[arg(long)]
        live_data: Option<bool>,
        #[arg(long)]
        notifications: Option<bool>,
        /// dark or light
        #[arg(long, value_parser = parse_variant::<Theme>)]
        theme: Option<Theme>,
        /// en or fr
        #[arg(long, value_parser = parse_variant::<Locale>)]
        locale: Option<Locale>,
    },
    /// Start the API server
    Serve,
}

/// Parses a strum-backed setting variant, reporting the rejected text.
fn parse_variant<T>(s: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    s.parse().map_err(|e| format!("invalid value '{s}': {e}"))
}

/// Top-level actions for interactive mode.
enum Tool {
    Assistant,
    Insight,
    Snapshot,
    ToggleLive,
    Server,
}

impl Tool {
    const ALL: &[Self] = &[
        Self::Assistant,
        Self::Insight,
        Self::Snapshot,
        Self::ToggleLive,
        Self::Server,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Assistant => "Health assistant",
            Self::Insight => "Location insight",
            Self::Snapshot => "Air quality snapshot",
            Self::ToggleLive => "Toggle live data",
            Self::Server => "Start server",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = air_vision_cli_utils::init_logger();
    let cli = Cli::parse();
    let store = SettingsStore::open_default()?;

    let Some(command) = cli.command else {
        return interactive(&multi, &store).await;
    };

    match command {
        Commands::Samples {
            time_offset,
            layers,
            seed,
        } => {
            let points = generate_samples(time_offset, &mut rng(seed));
            let layers = parse_layers(layers.as_deref());
            report::print_samples(&filter_layers(&points, &layers));
        }
        Commands::Insight {
            lat,
            lon,
            time_offset,
            seed,
        } => {
            check_coordinates(lat, lon)?;
            let points = generate_samples(time_offset, &mut rng(seed));
            let insight =
                air_vision_locate::surface_insight(lat, lon, &points, store.current().locale);
            println!("{}", serde_json::to_string_pretty(&insight)?);
        }
        Commands::Snapshot { lat, lon, live } => {
            check_coordinates(lat, lon)?;
            let settings = store.current();
            snapshot(&multi, lat, lon, live || settings.live_data, settings.locale).await;
        }
        Commands::Assistant => assistant::run(&multi, &store).await?,
        Commands::Settings {
            live_data,
            notifications,
            theme,
            locale,
        } => {
            let patch = SettingsPatch {
                live_data,
                notifications,
                theme,
                locale,
            };
            let settings = if patch.is_empty() {
                store.current()
            } else {
                store.update(&patch)?
            };
            report::print_settings(&settings, store.path());
        }
        Commands::Serve => serve().await?,
    }

    Ok(())
}

async fn interactive(
    multi: &MultiProgress,
    store: &SettingsStore,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Air Vision");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Assistant => assistant::run(multi, store).await?,
        Tool::Insight => {
            let (lat, lon) = assistant::prompt_coordinates()?;
            let points = generate_samples(0, &mut rng(None));
            let insight =
                air_vision_locate::surface_insight(lat, lon, &points, store.current().locale);
            report::print_insight(&insight);
        }
        Tool::Snapshot => {
            let (lat, lon) = assistant::prompt_coordinates()?;
            let settings = store.current();
            snapshot(multi, lat, lon, settings.live_data, settings.locale).await;
        }
        Tool::ToggleLive => {
            let live_data = !store.current().live_data;
            let settings = store.update(&SettingsPatch {
                live_data: Some(live_data),
                ..SettingsPatch::default()
            })?;
            report::print_settings(&settings, store.path());
        }
        Tool::Server => {
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(air_vision_server::interactive::run())
            })
            .await??;
        }
    }

    Ok(())
}

async fn snapshot(multi: &MultiProgress, lat: f64, lon: f64, live_data: bool, locale: Locale) {
    let fetcher = SnapshotFetcher::new(ReqwestTransport::default());
    let spinner = air_vision_cli_utils::spinner(multi, &format!("Resolving ({lat}, {lon})..."));
    let outcome = fetcher.fetch(lat, lon, live_data).await;
    spinner.finish_and_clear();

    let narrative =
        air_vision_risk::build_risk_narrative(&outcome.snapshot, TieringPolicy::ByFraction, locale);
    report::print_snapshot(&outcome, &narrative);
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    // The server uses actix-web's runtime, so run it in a blocking task to
    // avoid nesting tokio runtimes.
    tokio::task::spawn_blocking(|| {
        actix_web::rt::System::new().block_on(air_vision_server::run_server())
    })
    .await??;
    Ok(())
}

fn rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

fn check_coordinates(lat: f64, lon: f64) -> Result<(), String> {
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        Err(format!("Coordinates out of range: {lat}, {lon}"))
    }
}
