#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the air vision dashboard.
//!
//! Serves the synthetic sample grid, location insights for globe clicks,
//! live-or-synthetic snapshots, and the user settings. The globe renders
//! client-side from these JSON records.

mod handlers;
pub mod interactive;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use air_vision_air_quality_models::PollutionSamplePoint;
use air_vision_assistant::settings::SettingsStore;
use air_vision_live::fetcher::SnapshotFetcher;
use air_vision_live::transport::ReqwestTransport;
use air_vision_synth::samples::SampleGrid;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// The sample grid and the generator that refreshes it.
pub struct GridState {
    grid: SampleGrid,
    rng: StdRng,
}

impl GridState {
    /// Generates the offset-0 grid from `rng`.
    #[must_use]
    pub fn new(mut rng: StdRng) -> Self {
        Self {
            grid: SampleGrid::generate(0, &mut rng),
            rng,
        }
    }

    /// The points for `time_offset`, regenerating the grid if the offset
    /// changed.
    pub fn points_for(&mut self, time_offset: i32) -> Vec<PollutionSamplePoint> {
        if self.grid.ensure_offset(time_offset, &mut self.rng) {
            log::debug!("Regenerated sample grid for offset {time_offset}");
        }
        self.grid.points().to_vec()
    }
}

/// Shared application state.
pub struct AppState {
    /// Current sample grid; regenerated wholesale when the offset changes.
    pub grid: Mutex<GridState>,
    /// User settings (live-data flag, locale, ...).
    pub settings: Arc<SettingsStore>,
    /// Live snapshot fetcher for `/api/snapshot`.
    pub fetcher: SnapshotFetcher<ReqwestTransport>,
}

impl AppState {
    #[must_use]
    pub fn new(settings: Arc<SettingsStore>, rng: StdRng) -> Self {
        Self {
            grid: Mutex::new(GridState::new(rng)),
            settings,
            fetcher: SnapshotFetcher::new(ReqwestTransport::default()),
        }
    }

    /// Locks the sample grid.
    pub fn grid(&self) -> MutexGuard<'_, GridState> {
        self.grid.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/samples", web::get().to(handlers::samples))
            .route("/insight/point", web::get().to(handlers::point_insight))
            .route("/insight/surface", web::get().to(handlers::surface_insight))
            .route("/snapshot", web::get().to(handlers::snapshot))
            .route("/settings", web::get().to(handlers::get_settings))
            .route("/settings", web::put().to(handlers::update_settings)),
    );
}

/// Starts the air vision API server.
///
/// Opens the settings store, seeds the sample grid, and starts the
/// Actix-Web HTTP server on `BIND_ADDR`:`PORT`. The caller provides the
/// async runtime and initialises logging.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the settings file cannot be read,
/// or if the HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    log::info!("Opening settings...");
    let settings = SettingsStore::open_default().map_err(std::io::Error::other)?;

    let state = web::Data::new(AppState::new(Arc::new(settings), StdRng::from_entropy()));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
