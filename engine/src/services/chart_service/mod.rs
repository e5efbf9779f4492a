// engine/src/services/chart_service/mod.rs
// Router, shared state and the thin axum wrappers that log each request and
// dispatch to the handler modules.
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use crate::config::EngineSettings;
use crate::data::KlineSource;
use crate::error::EngineError;
use crate::generator::SeriesGenerator;

pub mod get_chart;
pub mod get_klines;
pub mod helpers;

use get_chart::{ChartQuery, ChartResponse};
use get_klines::{KlinesQuery, KlinesResponse};

pub struct AppState {
    pub settings: EngineSettings,
    pub generator: SeriesGenerator,
    pub klines: KlineSource,
}

impl AppState {
    pub fn new(settings: EngineSettings) -> Result<Self, EngineError> {
        let generator = SeriesGenerator::new(settings.generator.volume_range);
        let klines = KlineSource::from_settings(&settings.klines)?;
        Ok(AppState { settings, generator, klines })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/klines", get(klines))
        .route("/api/chart", get(chart))
        .layer(cors)
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    server_time: i64,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        server_time: chrono::Utc::now().timestamp_millis(),
    })
}

async fn klines(
    State(state): State<Arc<AppState>>,
    Query(query): Query<KlinesQuery>,
) -> Result<Json<KlinesResponse>, EngineError> {
    tracing::info!(
        symbol = ?query.symbol,
        interval = ?query.interval,
        limit = ?query.limit,
        "Received klines request, dispatching to handler."
    );
    get_klines::handle_get_klines(query, state).await.map(Json)
}

async fn chart(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ChartResponse>, EngineError> {
    tracing::info!(
        symbol = ?query.symbol,
        source = ?query.source,
        seed = ?query.seed,
        "Received chart request, dispatching to handler."
    );
    get_chart::handle_get_chart(query, state).await.map(Json)
}
