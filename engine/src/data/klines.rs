// Exchange klines client (public endpoint, no signing).
use std::time::Duration;

use axum::http::StatusCode;
use chrono::DateTime;
use serde_json::Value;
use shared::models::{Bar, Interval};
use tracing::{debug, instrument, warn};

use crate::error::EngineError;

const KLINES_PATH: &str = "/api/v3/klines";

#[derive(Debug, Clone)]
pub struct KlineClient {
    base_url: String,
    client: reqwest::Client,
}

impl KlineClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(%base_url, "KlineClient initialised");
        Ok(Self { base_url, client })
    }

    /// GET /api/v3/klines. Array indices used:
    ///   [0] openTime (ms), [1] open, [2] high, [3] low, [4] close, [5] volume
    #[instrument(skip(self), name = "klines::fetch")]
    pub async fn fetch(&self, pair: &str, interval: Interval, limit: u32) -> Result<Vec<Bar>, EngineError> {
        let url = format!("{}{}", self.base_url, KLINES_PATH);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("symbol", pair.to_string()),
                ("interval", interval.code().to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            warn!(pair, %status, "klines upstream returned an error");
            return Err(EngineError::UpstreamError {
                status: StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY),
                message,
            });
        }

        let body: Value = resp.json().await?;
        let bars = parse_klines(&body)?;
        debug!(pair, count = bars.len(), "klines fetched");
        Ok(bars)
    }
}

/// Converts the exchange's array-of-arrays payload into bars dated by the UTC
/// day of each open time. Short entries are skipped.
pub fn parse_klines(body: &Value) -> Result<Vec<Bar>, EngineError> {
    let raw = body
        .as_array()
        .ok_or_else(|| EngineError::ProcessingError("klines response is not an array".to_string()))?;

    let mut bars = Vec::with_capacity(raw.len());
    for entry in raw {
        let fields = entry
            .as_array()
            .ok_or_else(|| EngineError::ProcessingError("kline entry is not an array".to_string()))?;
        if fields.len() < 6 {
            warn!("skipping malformed kline entry with {} elements", fields.len());
            continue;
        }

        let open_time = fields[0]
            .as_i64()
            .ok_or_else(|| EngineError::ProcessingError(format!("invalid open time: {}", fields[0])))?;
        let date = DateTime::from_timestamp_millis(open_time)
            .ok_or_else(|| EngineError::ProcessingError(format!("open time out of range: {}", open_time)))?
            .date_naive();

        bars.push(Bar {
            date,
            open: parse_number(&fields[1])?,
            high: parse_number(&fields[2])?,
            low: parse_number(&fields[3])?,
            close: parse_number(&fields[4])?,
            volume: parse_number(&fields[5])?,
        });
    }
    Ok(bars)
}

/// Prices arrive as decimal strings; plain JSON numbers are accepted too.
fn parse_number(value: &Value) -> Result<f64, EngineError> {
    match value {
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| EngineError::ProcessingError(format!("Failed to parse decimal '{}': {}", s, e))),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| EngineError::ProcessingError(format!("Failed to parse decimal '{}'", n))),
        other => Err(EngineError::ProcessingError(format!("Unexpected kline field: {}", other))),
    }
}
