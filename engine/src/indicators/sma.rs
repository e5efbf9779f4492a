// Simple Moving Average (SMA) indicator implementation
use super::IndicatorCalculator;
use serde_json::Value;
use shared::models::IndicatorSeries;
use shared::utils::round2;

pub struct Sma {
    name: String,
    window: usize,
}

impl Sma {
    pub fn new(window: usize) -> Self {
        Self {
            name: format!("SMA({})", window),
            window,
        }
    }
}

impl IndicatorCalculator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "window": self.window })
    }

    fn calculate(&self, closes: &[f64]) -> IndicatorSeries {
        compute_sma(closes, self.window)
    }
}

/// Trailing mean over `window` closes, defined from index `window - 1`.
pub fn compute_sma(closes: &[f64], window: usize) -> IndicatorSeries {
    if window == 0 {
        return vec![None; closes.len()];
    }

    let mut results = Vec::with_capacity(closes.len());
    let mut sum = 0.0;
    for (i, close) in closes.iter().enumerate() {
        sum += close;
        if i >= window {
            sum -= closes[i - window];
        }
        if i + 1 >= window {
            results.push(Some(round2(sum / window as f64)));
        } else {
            results.push(None);
        }
    }
    results
}
