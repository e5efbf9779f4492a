// Numeric formatting shared by the generator and the indicators.
// Every stored price and every exposed indicator value goes through `round2`.

/// Rounds to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(16.666_666), 16.67);
        assert_eq!(round2(24.221), 24.22);
        assert_eq!(round2(-3.14159), -3.14);
        assert_eq!(round2(100.0), 100.0);
    }

    #[test]
    fn test_round_to_other_precisions() {
        assert_eq!(round_to(1234.5678, 0), 1235.0);
        assert_eq!(round_to(1234.5678, 3), 1234.568);
    }
}
