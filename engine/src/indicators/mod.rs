// Technical indicators module
pub mod ema;
pub mod rsi;
pub mod sma;

pub use ema::{compute_ema, Ema};
pub use rsi::{compute_rsi, Rsi};
pub use sma::{compute_sma, Sma};

use serde_json::Value;
use shared::models::{IndicatorParams, IndicatorSeries};

// Common trait for all indicators
pub trait IndicatorCalculator: Send + Sync {
    fn name(&self) -> &str;
    fn parameters(&self) -> Value;
    /// Output has the same length as `closes`; `None` where history is insufficient.
    fn calculate(&self, closes: &[f64]) -> IndicatorSeries;
}

/// The three overlays computed for one chart, each aligned to the input closes.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub sma: IndicatorSeries,
    pub ema: IndicatorSeries,
    pub rsi: IndicatorSeries,
}

impl IndicatorSet {
    pub fn compute(closes: &[f64], params: &IndicatorParams) -> Self {
        let calculators: [Box<dyn IndicatorCalculator>; 3] = [
            Box::new(Sma::new(params.sma_window)),
            Box::new(Ema::new(params.ema_span)),
            Box::new(Rsi::new(params.rsi_period)),
        ];
        let [sma, ema, rsi] = calculators.map(|c| {
            tracing::debug!(indicator = c.name(), parameters = %c.parameters(), "computing indicator");
            c.calculate(closes)
        });
        IndicatorSet { sma, ema, rsi }
    }
}
