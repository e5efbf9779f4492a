use chrono::NaiveDate;
use engine::generator::SeriesGenerator;
use engine::{compute_ema, compute_rsi, compute_sma};
use shared::models::{closes, Symbol};

fn anchored(symbol: Symbol, length: usize, seed: i64) -> Vec<shared::models::Bar> {
    let last = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
    SeriesGenerator::default().generate_until(symbol, length, seed, last)
}

#[test]
fn generated_closes_keep_length_through_every_indicator() {
    for length in [0, 1, 5, 14, 15, 180] {
        let closes = closes(&anchored(Symbol::Eth, length, 3));
        assert_eq!(compute_sma(&closes, 20).len(), length);
        assert_eq!(compute_ema(&closes, 12).len(), length);
        assert_eq!(compute_rsi(&closes, 14).len(), length);
    }
}

#[test]
fn warm_up_prefixes_match_window_sizes() {
    let closes = closes(&anchored(Symbol::Btc, 180, 1));

    let sma = compute_sma(&closes, 20);
    assert!(sma[..19].iter().all(Option::is_none));
    assert!(sma[19..].iter().all(Option::is_some));

    let ema = compute_ema(&closes, 12);
    assert!(ema[..11].iter().all(Option::is_none));
    assert!(ema[11..].iter().all(Option::is_some));

    let rsi = compute_rsi(&closes, 14);
    assert!(rsi[..14].iter().all(Option::is_none));
    assert!(rsi[14..].iter().flatten().all(|v| (0.0..=100.0).contains(v)));
}

#[test]
fn recomputation_is_idempotent() {
    let closes = closes(&anchored(Symbol::Btc, 120, 42));
    assert_eq!(compute_sma(&closes, 9), compute_sma(&closes, 9));
    assert_eq!(compute_ema(&closes, 9), compute_ema(&closes, 9));
    assert_eq!(compute_rsi(&closes, 9), compute_rsi(&closes, 9));
}

#[test]
fn sma_of_generated_series_is_bounded_by_window_extremes() {
    let closes = closes(&anchored(Symbol::Eth, 90, 17));
    let window = 10;
    for (i, value) in compute_sma(&closes, window).into_iter().enumerate() {
        if let Some(mean) = value {
            let slice = &closes[i + 1 - window..=i];
            let lo = slice.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = slice.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            assert!(mean >= lo - 0.005 && mean <= hi + 0.005);
        }
    }
}

#[test]
fn rsi_of_three_bar_example() {
    // changes +2, -1, +2: avg gain 4/3, avg loss 1/3, RS 4
    let rsi = compute_rsi(&[10.0, 12.0, 11.0, 13.0], 3);
    assert_eq!(rsi, vec![None, None, None, Some(80.0)]);
}

#[test]
fn indicators_on_a_known_walk() {
    let closes = closes(&anchored(Symbol::Btc, 180, 1));
    assert_eq!(compute_sma(&closes, 20)[179], Some(72997.71));
    assert_eq!(compute_ema(&closes, 12)[179], Some(74567.46));
    assert_eq!(compute_rsi(&closes, 14)[179], Some(64.66));
}
