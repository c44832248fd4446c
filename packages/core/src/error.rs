// ABOUTME: Error type shared by the resource services
// ABOUTME: Separates client-side validation failures from platform execution failures

use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The platform rejected or failed to execute a statement
    #[error("{0}")]
    Gateway(String),

    #[error("{0} not found")]
    NotFound(String),
}

impl ServiceError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Validation(_))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
