// Helper functions shared by the chart service handlers
use std::str::FromStr;

use shared::models::Interval;

use crate::error::EngineError;

/// Parses an optional query value. Absent or blank means `None`; anything
/// else must parse.
pub fn parse_param<T: FromStr>(name: &str, raw: Option<&str>) -> Result<Option<T>, EngineError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| EngineError::RequestError(format!("Invalid value for '{}': '{}'", name, value))),
    }
}

/// Like [`parse_param`] but an unparseable value falls back to `default`.
pub fn parse_param_or<T: FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|s| s.trim().parse::<T>().ok()).unwrap_or(default)
}

pub fn parse_interval(raw: Option<&str>, default: Interval) -> Result<Interval, EngineError> {
    Ok(parse_param::<Interval>("interval", raw)?.unwrap_or(default))
}

/// Symbol code as the client sent it, upper-cased, defaulting to `BTC`.
pub fn normalize_symbol(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("BTC")
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(parse_param::<usize>("sma", None).unwrap(), None);
        assert_eq!(parse_param::<usize>("sma", Some("  ")).unwrap(), None);
        assert_eq!(parse_param::<usize>("sma", Some("25")).unwrap(), Some(25));
        assert_eq!(parse_param::<i64>("seed", Some("-4")).unwrap(), Some(-4));
        let err = parse_param::<usize>("sma", Some("ten")).unwrap_err();
        assert!(matches!(err, EngineError::RequestError(_)));
        assert!(err.to_string().contains("'sma'"));
    }

    #[test]
    fn test_parse_param_or_falls_back() {
        assert_eq!(parse_param_or(Some("120"), 300u32), 120);
        assert_eq!(parse_param_or(Some("abc"), 300u32), 300);
        assert_eq!(parse_param_or(None, 300u32), 300);
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!(parse_interval(None, Interval::Day1).unwrap(), Interval::Day1);
        assert_eq!(parse_interval(Some("1h"), Interval::Day1).unwrap(), Interval::Hour1);
        assert_eq!(parse_interval(Some("12h"), Interval::Day1).unwrap(), Interval::Hour12);
        assert!(parse_interval(Some("7x"), Interval::Day1).is_err());
    }

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol(None), "BTC");
        assert_eq!(normalize_symbol(Some("eth")), "ETH");
        assert_eq!(normalize_symbol(Some("doge")), "DOGE");
    }
}
