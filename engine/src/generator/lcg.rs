// Lehmer / Park-Miller minimal standard generator.

/// Mersenne prime 2^31 - 1.
pub const MODULUS: i64 = 2_147_483_647;
const MULTIPLIER: i64 = 16_807;

/// Seedable uniform source over `[0, 1)`. Each generator owns its state, so
/// independent series never share a stream.
#[derive(Debug, Clone)]
pub struct ParkMiller {
    state: i64,
}

impl ParkMiller {
    pub fn new(seed: i64) -> Self {
        Self::with_offset(seed, 0)
    }

    /// Seeds from `seed + offset`. Non-positive residues are shifted up by
    /// `MODULUS - 1`; the state always ends in `[1, MODULUS - 1]`.
    pub fn with_offset(seed: i64, offset: i64) -> Self {
        let combined = i128::from(seed) + i128::from(offset);
        let mut state = (combined % i128::from(MODULUS)) as i64;
        if state <= 0 {
            state += MODULUS - 1;
        }
        Self { state: state.max(1) }
    }

    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state * MULTIPLIER % MODULUS;
        (self.state - 1) as f64 / (MODULUS - 1) as f64
    }

    /// Uniform draw in `[low, high)`.
    pub fn next_in(&mut self, low: f64, high: f64) -> f64 {
        low + self.next_f64() * (high - low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_standard_check_value() {
        let mut rng = ParkMiller::new(1);
        for _ in 0..10_000 {
            rng.next_f64();
        }
        assert_eq!(rng.state, 1_043_618_065);
    }

    #[test]
    fn test_offset_matches_combined_seed() {
        let mut a = ParkMiller::with_offset(0, 66);
        let mut b = ParkMiller::new(66);
        for _ in 0..5 {
            assert_eq!(a.next_f64(), b.next_f64());
        }
        assert_eq!(a.state, b.state);
    }

    #[test]
    fn test_first_draws_from_seed_66() {
        let mut rng = ParkMiller::new(66);
        rng.next_f64();
        assert_eq!(rng.state, 1_109_262);
        rng.next_f64();
        assert_eq!(rng.state, 1_463_497_258);
    }

    #[test]
    fn test_non_positive_seeds_shift_into_range() {
        assert_eq!(ParkMiller::new(0).state, MODULUS - 1);
        assert_eq!(ParkMiller::new(-5).state, MODULUS - 6);
        assert_eq!(ParkMiller::new(MODULUS).state, MODULUS - 1);
        assert_eq!(ParkMiller::new(-(MODULUS - 1)).state, 1);
    }

    #[test]
    fn test_extreme_seeds_do_not_overflow() {
        let mut rng = ParkMiller::with_offset(i64::MAX, 69);
        let value = rng.next_f64();
        assert!((0.0..1.0).contains(&value));
    }

    #[test]
    fn test_draws_stay_in_unit_interval() {
        let mut rng = ParkMiller::new(42);
        for _ in 0..1_000 {
            let value = rng.next_f64();
            assert!((0.0..1.0).contains(&value));
            let ranged = rng.next_in(0.55, 1.45);
            assert!((0.55..1.45).contains(&ranged));
        }
    }
}
