use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{Bar, Symbol};
use shared::utils::round2;

use super::lcg::ParkMiller;
use super::profile::SymbolProfile;

/// Multiplier range applied to a profile's base volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeRange {
    pub min: f64,
    pub max: f64,
}

impl Default for VolumeRange {
    fn default() -> Self {
        VolumeRange { min: 0.55, max: 1.45 }
    }
}

/// Produces reproducible OHLCV random walks. Holds configuration only; every
/// call builds its own random source, so one generator can serve many callers.
#[derive(Debug, Clone, Default)]
pub struct SeriesGenerator {
    volume_range: VolumeRange,
}

impl SeriesGenerator {
    pub fn new(volume_range: VolumeRange) -> Self {
        SeriesGenerator { volume_range }
    }

    /// `length` daily bars for `symbol`, the last one dated today. "Today" is
    /// the UTC calendar day, not the caller's local one, so near local
    /// midnight the anchor can differ by a day.
    pub fn generate(&self, symbol: Symbol, length: usize, seed: i64) -> Vec<Bar> {
        self.generate_until(symbol, length, seed, Utc::now().date_naive())
    }

    /// Same walk as [`generate`](Self::generate) with an explicit date for the last bar.
    pub fn generate_until(
        &self,
        symbol: Symbol,
        length: usize,
        seed: i64,
        last_date: NaiveDate,
    ) -> Vec<Bar> {
        let profile = SymbolProfile::for_symbol(symbol);
        let mut rng = ParkMiller::with_offset(seed, profile.seed_offset());
        let volatility = profile.volatility;
        let mut previous_close = profile.base_price;

        tracing::debug!(%symbol, length, seed, %last_date, "generating synthetic series");

        (0..length)
            .map(|index| {
                let open = previous_close;
                let shock = (rng.next_f64() - 0.5) * 2.0 * volatility;
                let close = (open * (profile.drift_factor() + shock)).max(1.0);

                let high_noise = rng.next_in(0.4, 1.2) * volatility;
                let low_noise = rng.next_in(0.4, 1.2) * volatility;
                let high = open.max(close) * (1.0 + high_noise);
                let low = (open.min(close) * (1.0 - low_noise)).max(1.0);

                let volume = (profile.base_volume
                    * rng.next_in(self.volume_range.min, self.volume_range.max))
                .round();

                previous_close = close;

                let days_back = (length - index - 1) as u64;
                let date = last_date
                    .checked_sub_days(Days::new(days_back))
                    .unwrap_or(NaiveDate::MIN);

                Bar {
                    date,
                    open: round2(open),
                    high: round2(high.max(open).max(close)),
                    low: round2(low.min(open).min(close)),
                    close: round2(close),
                    volume,
                }
            })
            .collect()
    }
}

/// Synthetic series with the canonical volume range, anchored to today.
pub fn generate_series(symbol: Symbol, length: usize, seed: i64) -> Vec<Bar> {
    SeriesGenerator::default().generate(symbol, length, seed)
}
