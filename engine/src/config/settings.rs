// Engine settings, loaded from a JSON file with per-section defaults.
use std::ops::RangeInclusive;
use std::path::Path;

use serde::Deserialize;
use shared::models::{IndicatorParams, Interval};

use crate::chart::RsiLevels;
use crate::error::EngineError;
use crate::generator::VolumeRange;

pub const CONFIG_PATH_ENV: &str = "CHARTS_CONFIG";
pub const HOST_ENV: &str = "CHARTS_HOST";
pub const PORT_ENV: &str = "CHARTS_PORT";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct EngineSettings {
    pub server: ServerSettings,
    pub generator: GeneratorSettings,
    pub indicators: IndicatorSettings,
    pub klines: KlineSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeneratorSettings {
    pub bar_count: usize,
    pub max_bar_count: usize,
    pub volume_range: VolumeRange,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        GeneratorSettings {
            bar_count: 180,
            max_bar_count: 2_000,
            volume_range: VolumeRange::default(),
        }
    }
}

/// Inclusive parameter bounds, mirroring the dashboard sliders.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: usize,
    pub max: usize,
}

impl Bounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Bounds { min, max }
    }

    pub fn range(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IndicatorSettings {
    pub defaults: IndicatorParams,
    pub sma_bounds: Bounds,
    pub ema_bounds: Bounds,
    pub rsi_bounds: Bounds,
    pub rsi_levels: RsiLevels,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        IndicatorSettings {
            defaults: IndicatorParams::default(),
            sma_bounds: Bounds::new(5, 60),
            ema_bounds: Bounds::new(5, 40),
            rsi_bounds: Bounds::new(5, 40),
            rsi_levels: RsiLevels::default(),
        }
    }
}

impl IndicatorSettings {
    /// Fills missing parameters from the defaults and checks each against its bounds.
    pub fn resolve(
        &self,
        sma_window: Option<usize>,
        ema_span: Option<usize>,
        rsi_period: Option<usize>,
    ) -> Result<IndicatorParams, EngineError> {
        let params = IndicatorParams {
            sma_window: sma_window.unwrap_or(self.defaults.sma_window),
            ema_span: ema_span.unwrap_or(self.defaults.ema_span),
            rsi_period: rsi_period.unwrap_or(self.defaults.rsi_period),
        };
        check_bounds("SMA window", params.sma_window, self.sma_bounds)?;
        check_bounds("EMA span", params.ema_span, self.ema_bounds)?;
        check_bounds("RSI period", params.rsi_period, self.rsi_bounds)?;
        Ok(params)
    }
}

fn check_bounds(what: &str, value: usize, bounds: Bounds) -> Result<(), EngineError> {
    if bounds.range().contains(&value) {
        Ok(())
    } else {
        Err(EngineError::IndicatorError(format!(
            "{} {} is outside {}..={}",
            what, value, bounds.min, bounds.max
        )))
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct KlineSettings {
    pub base_url: String,
    pub default_interval: Interval,
    pub default_limit: u32,
    pub cache_ttl_secs: u64,
    /// Most distinct requests held in the klines cache at once.
    pub cache_capacity: usize,
    pub timeout_secs: u64,
}

impl Default for KlineSettings {
    fn default() -> Self {
        KlineSettings {
            base_url: "https://api.binance.com".to_string(),
            default_interval: Interval::Day1,
            default_limit: 300,
            cache_ttl_secs: 60,
            cache_capacity: 64,
            timeout_secs: 10,
        }
    }
}

impl EngineSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let settings: EngineSettings = serde_json::from_str(&raw)?;
        settings.validate()?;
        tracing::info!(path = %path.as_ref().display(), "Loaded engine settings");
        Ok(settings)
    }

    /// Reads the file named by `CHARTS_CONFIG` (defaults when unset or
    /// unreadable), then applies `CHARTS_HOST` / `CHARTS_PORT`.
    pub fn from_env() -> Result<Self, EngineError> {
        let mut settings = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load(&path).unwrap_or_else(|e| {
                tracing::warn!(%path, error = %e, "Failed to load settings, using defaults");
                EngineSettings::default()
            }),
            Err(_) => EngineSettings::default(),
        };

        if let Ok(host) = std::env::var(HOST_ENV) {
            settings.server.host = host;
        }
        if let Ok(port) = std::env::var(PORT_ENV) {
            settings.server.port = port
                .parse()
                .map_err(|_| EngineError::ConfigError(format!("{} is not a port: '{}'", PORT_ENV, port)))?;
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let indicators = &self.indicators;
        for (name, bounds) in [
            ("sma_bounds", indicators.sma_bounds),
            ("ema_bounds", indicators.ema_bounds),
            ("rsi_bounds", indicators.rsi_bounds),
        ] {
            if bounds.min == 0 || bounds.min > bounds.max {
                return Err(EngineError::ConfigError(format!(
                    "{} must satisfy 1 <= min <= max, got {}..={}",
                    name, bounds.min, bounds.max
                )));
            }
        }
        let defaults = indicators.defaults;
        indicators
            .resolve(Some(defaults.sma_window), Some(defaults.ema_span), Some(defaults.rsi_period))
            .map_err(|e| EngineError::ConfigError(format!("indicator defaults: {}", e)))?;

        let levels = indicators.rsi_levels;
        if !(0.0..=100.0).contains(&levels.oversold)
            || !(0.0..=100.0).contains(&levels.overbought)
            || levels.oversold >= levels.overbought
        {
            return Err(EngineError::ConfigError(format!(
                "rsi_levels must satisfy 0 <= oversold < overbought <= 100, got {} / {}",
                levels.oversold, levels.overbought
            )));
        }

        let generator = &self.generator;
        if generator.bar_count == 0 || generator.bar_count > generator.max_bar_count {
            return Err(EngineError::ConfigError(format!(
                "generator.bar_count must be in 1..={}, got {}",
                generator.max_bar_count, generator.bar_count
            )));
        }
        let volume = generator.volume_range;
        if !(volume.min > 0.0 && volume.min < volume.max) {
            return Err(EngineError::ConfigError(format!(
                "generator.volume_range must satisfy 0 < min < max, got [{}, {}]",
                volume.min, volume.max
            )));
        }

        if self.klines.default_limit == 0 {
            return Err(EngineError::ConfigError("klines.default_limit must be positive".to_string()));
        }
        Ok(())
    }
}
