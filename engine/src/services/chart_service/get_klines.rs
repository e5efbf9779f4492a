// Handler for GET /api/klines
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::models::{Bar, Interval, Symbol};

use super::helpers::{normalize_symbol, parse_interval, parse_param_or};
use super::AppState;
use crate::error::EngineError;

#[derive(Debug, Default, Deserialize)]
pub struct KlinesQuery {
    pub symbol: Option<String>,
    pub interval: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct KlinesResponse {
    pub symbol: String,
    pub interval: Interval,
    pub rows: Vec<Bar>,
}

pub async fn handle_get_klines(query: KlinesQuery, state: Arc<AppState>) -> Result<KlinesResponse, EngineError> {
    let settings = &state.settings.klines;
    let symbol = normalize_symbol(query.symbol.as_deref());
    let interval = parse_interval(query.interval.as_deref(), settings.default_interval)?;
    let limit = parse_param_or(query.limit.as_deref(), settings.default_limit);

    // Unknown codes map to the default pair but keep their own name in the reply.
    let instrument = Symbol::from_code(&symbol);
    tracing::debug!(%symbol, pair = instrument.pair(), %interval, limit, "Handling klines request");

    let rows = state.klines.bars(instrument, interval, limit).await?;
    Ok(KlinesResponse { symbol, interval, rows })
}
