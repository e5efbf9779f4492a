// HTTP service layer
pub mod chart_service;

pub use chart_service::{router, AppState};
