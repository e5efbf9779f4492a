// Engine library root
pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod generator;
pub mod indicators;
pub mod services;

pub use generator::generate_series;
pub use indicators::{compute_ema, compute_rsi, compute_sma};
