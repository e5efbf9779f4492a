// Short-lived response cache for upstream klines, keyed by request.
use std::collections::HashMap;
use std::time::{Duration, Instant};

use shared::models::{Bar, Interval};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KlineKey {
    pub pair: String,
    pub interval: Interval,
    pub limit: u32,
}

impl std::fmt::Display for KlineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}x{}", self.pair, self.interval, self.limit)
    }
}

struct CachedRows {
    fetched_at: Instant,
    bars: Vec<Bar>,
}

pub struct KlineCache {
    ttl: Duration,
    capacity: usize,
    entries: RwLock<HashMap<KlineKey, CachedRows>>,
}

impl KlineCache {
    /// A zero `ttl` or `capacity` disables caching.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        KlineCache {
            ttl,
            capacity,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, key: &KlineKey) -> Option<Vec<Bar>> {
        self.get_at(key, Instant::now()).await
    }

    pub async fn get_at(&self, key: &KlineKey, now: Instant) -> Option<Vec<Bar>> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|cached| now.saturating_duration_since(cached.fetched_at) < self.ttl)
            .map(|cached| cached.bars.clone())
    }

    pub async fn insert(&self, key: KlineKey, bars: Vec<Bar>) {
        self.insert_at(key, bars, Instant::now()).await
    }

    pub async fn insert_at(&self, key: KlineKey, bars: Vec<Bar>, fetched_at: Instant) {
        if self.ttl.is_zero() || self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.write().await;
        entries.retain(|_, cached| fetched_at.saturating_duration_since(cached.fetched_at) < self.ttl);
        while entries.len() >= self.capacity && !entries.contains_key(&key) {
            let oldest = entries
                .iter()
                .min_by_key(|(_, cached)| cached.fetched_at)
                .map(|(k, _)| k.clone());
            match oldest {
                Some(k) => {
                    tracing::debug!(key = %k, "klines cache full, evicting oldest entry");
                    entries.remove(&k);
                }
                None => break,
            }
        }
        entries.insert(key, CachedRows { fetched_at, bars });
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
