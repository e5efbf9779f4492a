use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One OHLCV observation, keyed by calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Short axis label, e.g. `Oct 19`.
    pub fn label(&self) -> String {
        self.date.format("%b %-d").to_string()
    }

    pub fn is_up(&self) -> bool {
        self.close >= self.open
    }
}

/// Closing prices in bar order, the input every indicator consumes.
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Indicator output aligned by index to its input; `None` until the window fills.
pub type IndicatorSeries = Vec<Option<f64>>;

/// Supported instruments.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Symbol {
    #[default]
    Btc,
    Eth,
}

impl Symbol {
    pub const ALL: [Symbol; 2] = [Symbol::Btc, Symbol::Eth];

    /// Case-insensitive lookup that falls back to the default instrument.
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or_default()
    }

    pub fn code(&self) -> &'static str {
        match self {
            Symbol::Btc => "BTC",
            Symbol::Eth => "ETH",
        }
    }

    /// Exchange trading pair quoted in USDT.
    pub fn pair(&self) -> &'static str {
        match self {
            Symbol::Btc => "BTCUSDT",
            Symbol::Eth => "ETHUSDT",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown symbol '{0}'")]
pub struct UnknownSymbol(pub String);

impl FromStr for Symbol {
    type Err = UnknownSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BTC" => Ok(Symbol::Btc),
            "ETH" => Ok(Symbol::Eth),
            _ => Err(UnknownSymbol(s.to_string())),
        }
    }
}

/// Kline interval, serialized with the exchange's short codes. Codes are
/// case-sensitive: `1m` is one minute, `1M` one month.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Interval {
    #[serde(rename = "1s")]
    Second1,
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "3m")]
    Minute3,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    Minute30,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "2h")]
    Hour2,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "6h")]
    Hour6,
    #[serde(rename = "8h")]
    Hour8,
    #[serde(rename = "12h")]
    Hour12,
    #[default]
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "3d")]
    Day3,
    #[serde(rename = "1w")]
    Week1,
    #[serde(rename = "1M")]
    Month1,
}

impl Interval {
    pub const ALL: [Interval; 16] = [
        Interval::Second1,
        Interval::Minute1,
        Interval::Minute3,
        Interval::Minute5,
        Interval::Minute15,
        Interval::Minute30,
        Interval::Hour1,
        Interval::Hour2,
        Interval::Hour4,
        Interval::Hour6,
        Interval::Hour8,
        Interval::Hour12,
        Interval::Day1,
        Interval::Day3,
        Interval::Week1,
        Interval::Month1,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Interval::Second1 => "1s",
            Interval::Minute1 => "1m",
            Interval::Minute3 => "3m",
            Interval::Minute5 => "5m",
            Interval::Minute15 => "15m",
            Interval::Minute30 => "30m",
            Interval::Hour1 => "1h",
            Interval::Hour2 => "2h",
            Interval::Hour4 => "4h",
            Interval::Hour6 => "6h",
            Interval::Hour8 => "8h",
            Interval::Hour12 => "12h",
            Interval::Day1 => "1d",
            Interval::Day3 => "3d",
            Interval::Week1 => "1w",
            Interval::Month1 => "1M",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown interval '{0}'")]
pub struct UnknownInterval(pub String);

impl FromStr for Interval {
    type Err = UnknownInterval;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Interval::ALL
            .into_iter()
            .find(|interval| interval.code() == code)
            .ok_or_else(|| UnknownInterval(code.to_string()))
    }
}

/// User-tunable indicator windows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndicatorParams {
    pub sma_window: usize,
    pub ema_span: usize,
    pub rsi_period: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        IndicatorParams {
            sma_window: 20,
            ema_span: 12,
            rsi_period: 14,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(open: f64, close: f64) -> Bar {
        Bar {
            date: NaiveDate::from_ymd_opt(2024, 10, 5).unwrap(),
            open,
            high: open.max(close),
            low: open.min(close),
            close,
            volume: 1.0,
        }
    }

    #[test]
    fn label_uses_short_month_and_unpadded_day() {
        assert_eq!(bar(1.0, 2.0).label(), "Oct 5");
    }

    #[test]
    fn flat_bar_counts_as_up() {
        assert!(bar(10.0, 10.0).is_up());
        assert!(!bar(10.0, 9.0).is_up());
    }

    #[test]
    fn symbol_lookup_is_case_insensitive_with_fallback() {
        assert_eq!(Symbol::from_code("eth"), Symbol::Eth);
        assert_eq!(Symbol::from_code(" BTC "), Symbol::Btc);
        assert_eq!(Symbol::from_code("DOGE"), Symbol::Btc);
        assert!("DOGE".parse::<Symbol>().is_err());
        assert_eq!(Symbol::Eth.pair(), "ETHUSDT");
    }

    #[test]
    fn interval_codes_match_serde_names() {
        for interval in Interval::ALL {
            let code = interval.code();
            assert_eq!(code.parse::<Interval>().unwrap(), interval);
            assert_eq!(serde_json::to_string(&interval).unwrap(), format!("\"{}\"", code));
        }
        assert!("2d".parse::<Interval>().is_err());
    }

    #[test]
    fn interval_month_and_minute_are_distinct() {
        assert_eq!("1M".parse::<Interval>().unwrap(), Interval::Month1);
        assert_eq!("1m".parse::<Interval>().unwrap(), Interval::Minute1);
        assert_eq!("12h".parse::<Interval>().unwrap(), Interval::Hour12);
    }

    #[test]
    fn parse_errors_name_the_rejected_code() {
        assert_eq!("DOGE".parse::<Symbol>().unwrap_err().to_string(), "unknown symbol 'DOGE'");
        assert_eq!("7x".parse::<Interval>().unwrap_err().to_string(), "unknown interval '7x'");
    }

    #[test]
    fn bar_date_serializes_as_iso_day() {
        let json = serde_json::to_value(bar(1.0, 2.0)).unwrap();
        assert_eq!(json["date"], "2024-10-05");
    }
}
