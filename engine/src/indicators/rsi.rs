// Relative Strength Index (RSI) indicator implementation, Wilder's smoothing
use super::IndicatorCalculator;
use serde_json::Value;
use shared::models::IndicatorSeries;
use shared::utils::round2;

pub struct Rsi {
    name: String,
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("RSI({})", period),
            period,
        }
    }
}

impl IndicatorCalculator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> Value {
        serde_json::json!({ "period": self.period })
    }

    fn calculate(&self, closes: &[f64]) -> IndicatorSeries {
        compute_rsi(closes, self.period)
    }
}

/// First value lands at index `period`; everything before stays `None`.
pub fn compute_rsi(closes: &[f64], period: usize) -> IndicatorSeries {
    let mut results = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return results;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for i in 1..=period {
        let change = closes[i] - closes[i - 1];
        if change >= 0.0 {
            gains += change;
        } else {
            losses -= change; // losses are positive values
        }
    }

    let n = period as f64;
    let mut avg_gain = gains / n;
    let mut avg_loss = losses / n;
    results[period] = Some(format_rsi(avg_gain, avg_loss));

    for i in (period + 1)..closes.len() {
        let change = closes[i] - closes[i - 1];
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        avg_gain = (avg_gain * (n - 1.0) + gain) / n;
        avg_loss = (avg_loss * (n - 1.0) + loss) / n;
        results[i] = Some(format_rsi(avg_gain, avg_loss));
    }
    results
}

fn format_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    // No losses pins the index at 100 instead of dividing by zero.
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    round2(100.0 - 100.0 / (1.0 + rs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_calculation() {
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
            46.25,
        ];

        let results = Rsi::new(14).calculate(&closes);

        assert_eq!(results.len(), closes.len());
        for (i, value) in results.iter().enumerate().take(14) {
            assert_eq!(*value, None, "Expected None at index {}", i);
        }
        let defined: Vec<f64> = results[14..].iter().map(|v| v.unwrap()).collect();
        assert_eq!(defined, vec![70.46, 66.25, 66.48, 69.35, 66.29, 57.92, 63.19]);
    }

    #[test]
    fn test_rsi_insufficient_data() {
        assert_eq!(compute_rsi(&[1.0; 10], 14), vec![None; 10]);
        // n == period is still insufficient
        assert_eq!(compute_rsi(&[1.0; 14], 14), vec![None; 14]);
    }

    #[test]
    fn test_rsi_all_gains() {
        let closes: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let results = compute_rsi(&closes, 14);
        for value in &results[..14] {
            assert_eq!(*value, None);
        }
        for value in &results[14..] {
            assert_eq!(*value, Some(100.0));
        }
    }

    #[test]
    fn test_rsi_all_losses() {
        let closes: Vec<f64> = (1..=20).map(|i| 20.0 - i as f64).collect();
        let results = compute_rsi(&closes, 14);
        for value in &results[14..] {
            assert_eq!(*value, Some(0.0));
        }
    }

    #[test]
    fn test_rsi_flat_series_pins_at_100() {
        let results = compute_rsi(&[5.0; 8], 3);
        assert_eq!(&results[3..], &[Some(100.0); 5]);
    }

    #[test]
    fn test_rsi_zero_period_is_undefined_everywhere() {
        assert_eq!(compute_rsi(&[1.0, 2.0, 3.0], 0), vec![None; 3]);
    }

    #[test]
    fn test_rsi_stays_within_bounds() {
        let closes = vec![10.0, 12.0, 9.0, 14.0, 8.0, 15.0, 7.0, 16.0, 6.0, 17.0];
        for value in compute_rsi(&closes, 3).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&value), "RSI out of range: {}", value);
        }
    }
}
