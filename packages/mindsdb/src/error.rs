// ABOUTME: MindsDB gateway error types
// ABOUTME: Distinguishes start-up connectivity failures from statement execution failures

use mindgate_core::ServiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Every connection strategy failed; fatal at start-up
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The platform rejected or could not run a statement
    #[error("Query failed: {0}")]
    Execution(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

impl From<GatewayError> for ServiceError {
    fn from(err: GatewayError) -> Self {
        ServiceError::Gateway(err.to_string())
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
