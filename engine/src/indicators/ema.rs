// Exponential Moving Average (EMA) indicator implementation
use super::IndicatorCalculator;
use serde_json::Value;
use shared::models::IndicatorSeries;
use shared::utils::round2;

pub struct Ema {
    name: String,
    span: usize,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        Self {
            name: format!("EMA({})", span),
            span,
        }
    }
}

impl IndicatorCalculator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "span": self.span })
    }

    fn calculate(&self, closes: &[f64]) -> IndicatorSeries {
        compute_ema(closes, self.span)
    }
}

/// EMA seeded with the first close. The recursion runs from index 0 but values
/// are only exposed from index `span - 1`; the running average is never rounded.
pub fn compute_ema(closes: &[f64], span: usize) -> IndicatorSeries {
    if span == 0 {
        return vec![None; closes.len()];
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut results = Vec::with_capacity(closes.len());
    let mut ema: Option<f64> = None;

    for (i, &close) in closes.iter().enumerate() {
        let current = match ema {
            None => close,
            Some(previous) => alpha * close + (1.0 - alpha) * previous,
        };
        ema = Some(current);
        if i + 1 >= span {
            results.push(Some(round2(current)));
        } else {
            results.push(None);
        }
    }
    results
}
