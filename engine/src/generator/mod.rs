// Synthetic OHLCV series for demos when no live feed is available.
pub mod lcg;
pub mod profile;
pub mod series;

pub use lcg::ParkMiller;
pub use profile::SymbolProfile;
pub use series::{generate_series, SeriesGenerator, VolumeRange};
