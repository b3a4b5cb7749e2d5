//! HTTP handler functions for the air vision API.

use actix_web::{HttpResponse, web};
use air_vision_air_quality_models::TieringPolicy;
use air_vision_assistant::settings::SettingsPatch;
use air_vision_server_models::{
    ApiError, ApiHealth, ApiSamples, ApiSnapshot, PointInsightParams, SamplesQueryParams,
    SnapshotParams, SurfaceInsightParams, parse_layers,
};
use air_vision_synth::samples::{aggregate_by_city, filter_layers};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/samples`
///
/// Returns the sample grid for `timeOffset`, filtered to `layers`.
pub async fn samples(
    state: web::Data<AppState>,
    params: web::Query<SamplesQueryParams>,
) -> HttpResponse {
    let time_offset = params.time_offset.unwrap_or(0);
    let layers = parse_layers(params.layers.as_deref());
    let points = state.grid().points_for(time_offset);

    HttpResponse::Ok().json(ApiSamples {
        time_offset,
        points: filter_layers(&points, &layers).into_iter().cloned().collect(),
    })
}

/// `GET /api/insight/point`
///
/// Insight for the `index`-th marker of the layer-filtered sample list.
pub async fn point_insight(
    state: web::Data<AppState>,
    params: web::Query<PointInsightParams>,
) -> HttpResponse {
    let layers = parse_layers(params.layers.as_deref());
    let points = state.grid().points_for(params.time_offset.unwrap_or(0));
    let filtered = filter_layers(&points, &layers);

    let Some(clicked) = filtered.get(params.index) else {
        return not_found(&format!("No sample point at index {}", params.index));
    };

    let cities = aggregate_by_city(&points);
    let locale = state.settings.current().locale;
    match air_vision_locate::point::point_insight(clicked, &cities, locale) {
        Some(insight) => HttpResponse::Ok().json(insight),
        None => not_found(&format!("No city data for {}", clicked.name)),
    }
}

/// `GET /api/insight/surface`
///
/// Insight for a click anywhere on the globe: the regional average when
/// the click falls inside a region with samples, otherwise the nearest
/// city.
pub async fn surface_insight(
    state: web::Data<AppState>,
    params: web::Query<SurfaceInsightParams>,
) -> HttpResponse {
    if let Err(response) = validate_coordinates(params.lat, params.lon) {
        return response;
    }

    let points = state.grid().points_for(params.time_offset.unwrap_or(0));
    let locale = state.settings.current().locale;

    HttpResponse::Ok().json(air_vision_locate::surface_insight(
        params.lat, params.lon, &points, locale,
    ))
}

/// `GET /api/snapshot`
///
/// Resolves a snapshot for a coordinate, live when enabled in the
/// settings, and classifies it with the by-fraction policy.
pub async fn snapshot(
    state: web::Data<AppState>,
    params: web::Query<SnapshotParams>,
) -> HttpResponse {
    if let Err(response) = validate_coordinates(params.lat, params.lon) {
        return response;
    }

    let settings = state.settings.current();
    let outcome = state
        .fetcher
        .fetch(params.lat, params.lon, settings.live_data)
        .await;
    let narrative = air_vision_risk::build_risk_narrative(
        &outcome.snapshot,
        TieringPolicy::ByFraction,
        settings.locale,
    );

    HttpResponse::Ok().json(ApiSnapshot {
        snapshot: outcome.snapshot,
        narrative,
        origin: outcome.origin,
        fetched_at: outcome.fetched_at,
    })
}

/// `GET /api/settings`
pub async fn get_settings(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.settings.current())
}

/// `PUT /api/settings`
///
/// Applies a partial update and returns the resulting settings.
pub async fn update_settings(
    state: web::Data<AppState>,
    patch: web::Json<SettingsPatch>,
) -> HttpResponse {
    match state.settings.update(&patch) {
        Ok(settings) => HttpResponse::Ok().json(settings),
        Err(e) => {
            log::error!("Failed to update settings: {e}");
            HttpResponse::InternalServerError().json(ApiError {
                error: "Failed to update settings".to_string(),
            })
        }
    }
}

fn validate_coordinates(lat: f64, lon: f64) -> Result<(), HttpResponse> {
    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        Err(HttpResponse::BadRequest().json(ApiError {
            error: format!("Coordinates out of range: {lat}, {lon}"),
        }))
    }
}

fn not_found(message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiError {
        error: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use actix_web::{App, http::StatusCode, test, web};
    use air_vision_assistant::settings::SettingsStore;
    use air_vision_live::fetcher::SnapshotOrigin;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::Value;

    use crate::{AppState, configure};

    fn settings_path() -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!(
            "air_vision_server_{}_{n}/settings.toml",
            std::process::id()
        ))
    }

    fn state() -> web::Data<AppState> {
        let settings = SettingsStore::open(settings_path()).unwrap();
        web::Data::new(AppState::new(
            Arc::new(settings),
            StdRng::seed_from_u64(42),
        ))
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(App::new().app_data($state.clone()).configure(configure)).await
        };
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let app = app!(state());
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["healthy"], true);
    }

    #[actix_web::test]
    async fn samples_filter_by_layer() {
        let app = app!(state());

        let req = test::TestRequest::get().uri("/api/samples").to_request();
        let all: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all["points"].as_array().unwrap().len(), 33);

        let req = test::TestRequest::get()
            .uri("/api/samples?timeOffset=3&layers=PM")
            .to_request();
        let pm: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(pm["timeOffset"], 3);
        let points = pm["points"].as_array().unwrap();
        assert_eq!(points.len(), 11);
        assert!(points.iter().all(|p| p["type"] == "PM"));
    }

    #[actix_web::test]
    async fn point_insight_names_the_city() {
        let app = app!(state());
        let req = test::TestRequest::get()
            .uri("/api/insight/point?index=0&layers=NO2")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["name"], "New York");
        assert_eq!(body["location"], "New York (satellite + ground data)");
    }

    #[actix_web::test]
    async fn point_insight_out_of_range_is_404() {
        let app = app!(state());
        let req = test::TestRequest::get()
            .uri("/api/insight/point?index=11&layers=Ozone")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn surface_insight_in_north_america_is_regional() {
        let app = app!(state());
        let req = test::TestRequest::get()
            .uri("/api/insight/surface?lat=45.5&lon=-73.57")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["region"], "north-america");
        assert_eq!(
            body["regionInsights"]["diseaseProbabilities"]
                .as_array()
                .unwrap()
                .len(),
            4
        );
    }

    #[actix_web::test]
    async fn out_of_range_coordinates_are_rejected() {
        let app = app!(state());
        for uri in [
            "/api/insight/surface?lat=91&lon=0",
            "/api/snapshot?lat=0&lon=-181",
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }

    #[actix_web::test]
    async fn snapshot_is_synthetic_by_default() {
        let app = app!(state());
        let req = test::TestRequest::get()
            .uri("/api/snapshot?lat=48.8566&lon=2.3522")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let expected = air_vision_synth::fallback_snapshot(48.8566, 2.3522);
        assert_eq!(body["origin"], SnapshotOrigin::Synthetic.as_ref());
        assert_eq!(body["snapshot"]["aqi"], expected.aqi);
        assert!(body["narrative"]["label"].is_string());
    }

    #[actix_web::test]
    async fn settings_round_trip_through_put() {
        let state = state();
        let app = app!(state);

        let req = test::TestRequest::put()
            .uri("/api/settings")
            .set_json(serde_json::json!({ "locale": "fr" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["locale"], "fr");
        assert_eq!(body["liveData"], false);

        let req = test::TestRequest::get().uri("/api/settings").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["locale"], "fr");
        assert_eq!(
            state.settings.current().locale,
            air_vision_air_quality_models::Locale::Fr
        );
    }
}
