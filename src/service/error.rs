//! Error type returned at the service boundary.

use thiserror::Error;

use crate::error::StoreError;
use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed or out-of-range input. Nothing was written.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// Unknown id. An expected outcome, not a failure.
    #[error("not found: {collection}:{id}")]
    NotFound { collection: String, id: String },

    /// Storage failed. Memory and disk still hold the previous document.
    #[error("store error: {0}")]
    Store(#[source] StoreError),

    /// The worker running the request panicked or was cancelled.
    #[error("request task failed: {0}")]
    Task(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { collection, id } => ServiceError::NotFound { collection, id },
            other => ServiceError::Store(other),
        }
    }
}

impl ServiceError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::NotFound { .. } => 404,
            ServiceError::Store(_) | ServiceError::Task(_) => 500,
        }
    }

    /// Message safe to show to clients; detail stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "Invalid request body",
            ServiceError::NotFound { .. } => "Not found",
            ServiceError::Store(_) | ServiceError::Task(_) => "Internal server error",
        }
    }
}
