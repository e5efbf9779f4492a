use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Configuration parse error: {source}")]
    ConfigParseError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Indicator parameter error: {0}")]
    IndicatorError(String),

    #[error("Invalid request: {0}")]
    RequestError(String),

    #[error("Upstream returned {status}: {message}")]
    UpstreamError { status: StatusCode, message: String },

    #[error("Upstream transport error: {source}")]
    TransportError {
        #[from]
        source: reqwest::Error,
    },

    #[error("Internal processing error: {0}")]
    ProcessingError(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    pub fn status(&self) -> StatusCode {
        match self {
            EngineError::IndicatorError(_) | EngineError::RequestError(_) => StatusCode::BAD_REQUEST,
            EngineError::UpstreamError { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to clients. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            EngineError::IndicatorError(msg) | EngineError::RequestError(msg) => msg.clone(),
            EngineError::UpstreamError { .. } => "Upstream error".to_string(),
            _ => "Server error".to_string(),
        }
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        tracing::error!("Mapping EngineError to HTTP response: {:?}", self);
        let body = Json(serde_json::json!({ "error": self.public_message() }));
        (self.status(), body).into_response()
    }
}
