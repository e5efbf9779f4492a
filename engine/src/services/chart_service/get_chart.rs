// Handler for GET /api/chart
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::models::{Interval, Symbol};

use super::helpers::{normalize_symbol, parse_interval, parse_param};
use super::AppState;
use crate::chart::{build_chart, ChartFrame};
use crate::error::EngineError;

const DEFAULT_SEED: i64 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartSource {
    #[default]
    Synthetic,
    Live,
}

impl FromStr for ChartSource {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "synthetic" => Ok(ChartSource::Synthetic),
            "live" => Ok(ChartSource::Live),
            other => Err(EngineError::RequestError(format!(
                "Unknown source '{}'. Use 'synthetic' or 'live'.",
                other
            ))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ChartQuery {
    pub symbol: Option<String>,
    pub source: Option<String>,
    pub length: Option<String>,
    pub seed: Option<String>,
    pub interval: Option<String>,
    pub limit: Option<String>,
    pub sma: Option<String>,
    pub ema: Option<String>,
    pub rsi: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartResponse {
    pub symbol: Symbol,
    pub source: ChartSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
    #[serde(flatten)]
    pub frame: ChartFrame,
}

pub async fn handle_get_chart(query: ChartQuery, state: Arc<AppState>) -> Result<ChartResponse, EngineError> {
    let settings = &state.settings;
    let symbol = Symbol::from_code(&normalize_symbol(query.symbol.as_deref()));
    let source = match query.source.as_deref() {
        Some(raw) => raw.parse::<ChartSource>()?,
        None => ChartSource::default(),
    };

    let params = settings.indicators.resolve(
        parse_param("sma", query.sma.as_deref())?,
        parse_param("ema", query.ema.as_deref())?,
        parse_param("rsi", query.rsi.as_deref())?,
    )?;

    let (bars, seed, interval) = match source {
        ChartSource::Synthetic => {
            let length = parse_param::<usize>("length", query.length.as_deref())?
                .unwrap_or(settings.generator.bar_count);
            if length == 0 || length > settings.generator.max_bar_count {
                return Err(EngineError::RequestError(format!(
                    "length must be in 1..={}, got {}",
                    settings.generator.max_bar_count, length
                )));
            }
            let seed = parse_param::<i64>("seed", query.seed.as_deref())?.unwrap_or(DEFAULT_SEED);
            (state.generator.generate(symbol, length, seed), Some(seed), None)
        }
        ChartSource::Live => {
            let interval = parse_interval(query.interval.as_deref(), settings.klines.default_interval)?;
            let limit = parse_param::<u32>("limit", query.limit.as_deref())?
                .unwrap_or(settings.klines.default_limit);
            (state.klines.bars(symbol, interval, limit).await?, None, Some(interval))
        }
    };

    tracing::debug!(%symbol, ?source, bars = bars.len(), ?params, "Building chart frame");
    let frame = build_chart(&bars, &params, settings.indicators.rsi_levels);
    Ok(ChartResponse { symbol, source, seed, interval, frame })
}
