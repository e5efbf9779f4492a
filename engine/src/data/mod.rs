// Live market data: exchange klines behind a short-lived cache.
pub mod kline_cache;
pub mod klines;

use std::time::Duration;

use shared::models::{Bar, Interval, Symbol};

use crate::config::settings::KlineSettings;
use crate::error::EngineError;
use kline_cache::{KlineCache, KlineKey};
use klines::KlineClient;

/// Most rows the exchange returns for one klines request.
pub const MAX_KLINE_LIMIT: u32 = 1000;

pub struct KlineSource {
    client: KlineClient,
    cache: KlineCache,
}

impl KlineSource {
    pub fn new(client: KlineClient, cache: KlineCache) -> Self {
        KlineSource { client, cache }
    }

    pub fn from_settings(settings: &KlineSettings) -> Result<Self, EngineError> {
        let client = KlineClient::new(&settings.base_url, Duration::from_secs(settings.timeout_secs))?;
        let cache = KlineCache::new(Duration::from_secs(settings.cache_ttl_secs), settings.cache_capacity);
        Ok(KlineSource::new(client, cache))
    }

    /// Bars for `symbol`'s USDT pair, oldest first. Served from cache while fresh.
    /// `limit` is clamped to `1..=MAX_KLINE_LIMIT`.
    pub async fn bars(&self, symbol: Symbol, interval: Interval, limit: u32) -> Result<Vec<Bar>, EngineError> {
        let limit = limit.clamp(1, MAX_KLINE_LIMIT);
        let key = KlineKey {
            pair: symbol.pair().to_string(),
            interval,
            limit,
        };
        if let Some(bars) = self.cache.get(&key).await {
            tracing::debug!(%key, count = bars.len(), "klines cache hit");
            return Ok(bars);
        }

        let bars = self.client.fetch(&key.pair, interval, limit).await?;
        self.cache.insert(key, bars.clone()).await;
        Ok(bars)
    }
}
