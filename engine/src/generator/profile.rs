use serde::Serialize;
use shared::models::Symbol;

/// Random-walk parameters for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SymbolProfile {
    pub symbol: Symbol,
    pub base_price: f64,
    /// Per-step drift, in percent.
    pub drift_pct: f64,
    pub volatility: f64,
    pub base_volume: f64,
}

static PROFILES: [SymbolProfile; 2] = [
    SymbolProfile {
        symbol: Symbol::Btc,
        base_price: 45_000.0,
        drift_pct: 0.18,
        volatility: 0.035,
        base_volume: 38_000.0,
    },
    SymbolProfile {
        symbol: Symbol::Eth,
        base_price: 3_000.0,
        drift_pct: 0.12,
        volatility: 0.028,
        base_volume: 24_000.0,
    },
];

impl SymbolProfile {
    /// Falls back to the first profile when the symbol has no entry.
    pub fn for_symbol(symbol: Symbol) -> &'static SymbolProfile {
        PROFILES
            .iter()
            .find(|p| p.symbol == symbol)
            .unwrap_or(&PROFILES[0])
    }

    /// Seed offset so that equal seeds diverge across symbols: the character
    /// code of the symbol's first letter.
    pub fn seed_offset(&self) -> i64 {
        self.symbol.code().bytes().next().map_or(0, i64::from)
    }

    pub fn drift_factor(&self) -> f64 {
        1.0 + self.drift_pct / 100.0
    }
}
