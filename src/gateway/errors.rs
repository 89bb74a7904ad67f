//! Error types for gateway operations

use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Identity resolution failed: {0}")]
    Identity(String),

    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Remote function error: {0}")]
    Remote(String),

    #[error("Function name must not be empty")]
    EmptyFunctionName,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GatewayError {
    pub fn identity(msg: impl Into<String>) -> Self {
        Self::Identity(msg.into())
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status of the failed response, if the failure was a status error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
