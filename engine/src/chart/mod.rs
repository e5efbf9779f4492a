// Chart projection: zips indicator overlays onto bars and derives the candle
// geometry and axis domains the renderer draws.
use serde::{Deserialize, Serialize};
use shared::models::{closes, Bar, IndicatorParams};
use shared::utils::round2;

use crate::indicators::IndicatorSet;

/// Minimum candle body and wick height as a fraction of the close, so flat
/// bars stay visible.
const MIN_CANDLE_FRACTION: f64 = 0.0015;
const PRICE_PADDING_FRACTION: f64 = 0.08;
const MIN_PRICE_PADDING_FRACTION: f64 = 0.01;
const VOLUME_HEADROOM: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiZone {
    Overbought,
    Neutral,
    Oversold,
}

/// RSI reference levels drawn on the oscillator panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiLevels {
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for RsiLevels {
    fn default() -> Self {
        RsiLevels {
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

impl RsiLevels {
    pub fn zone(&self, rsi: f64) -> RsiZone {
        if rsi >= self.overbought {
            RsiZone::Overbought
        } else if rsi <= self.oversold {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    #[serde(flatten)]
    pub bar: Bar,
    pub label: String,
    pub sma: Option<f64>,
    pub ema: Option<f64>,
    pub rsi: Option<f64>,
    pub rsi_zone: Option<RsiZone>,
    pub body_base: f64,
    pub body_range: f64,
    pub wick_base: f64,
    pub wick_range: f64,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub params: IndicatorParams,
    pub rsi_levels: RsiLevels,
    pub points: Vec<ChartPoint>,
    /// `None` lets the renderer pick its own bounds.
    pub price_domain: Option<[f64; 2]>,
    pub volume_domain: [f64; 2],
    pub latest_close: f64,
}

pub fn build_chart(bars: &[Bar], params: &IndicatorParams, rsi_levels: RsiLevels) -> ChartFrame {
    let indicators = IndicatorSet::compute(&closes(bars), params);

    let points = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let rsi = indicators.rsi[i];
            ChartPoint {
                label: bar.label(),
                sma: indicators.sma[i],
                ema: indicators.ema[i],
                rsi,
                rsi_zone: rsi.map(|v| rsi_levels.zone(v)),
                body_base: bar.open.min(bar.close),
                body_range: round2((bar.close - bar.open).abs().max(bar.close * MIN_CANDLE_FRACTION)),
                wick_base: bar.low,
                wick_range: round2((bar.high - bar.low).max(bar.close * MIN_CANDLE_FRACTION)),
                direction: if bar.is_up() { Direction::Up } else { Direction::Down },
                bar: bar.clone(),
            }
        })
        .collect();

    ChartFrame {
        params: *params,
        rsi_levels,
        points,
        price_domain: price_domain(bars),
        volume_domain: volume_domain(bars),
        latest_close: bars.last().map_or(0.0, |b| b.close),
    }
}

fn price_domain(bars: &[Bar]) -> Option<[f64; 2]> {
    if bars.is_empty() {
        return None;
    }
    let high = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let low = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    let padding = ((high - low) * PRICE_PADDING_FRACTION).max(high * MIN_PRICE_PADDING_FRACTION);
    Some([round2(low - padding), round2(high + padding)])
}

fn volume_domain(bars: &[Bar]) -> [f64; 2] {
    if bars.is_empty() {
        return [0.0, 1.0];
    }
    let max_volume = bars.iter().map(|b| b.volume).fold(1.0, f64::max);
    [0.0, (max_volume * VOLUME_HEADROOM).ceil()]
}
