//! Core error types used across the system

use thiserror::Error;

use crate::temporal::TemporalError;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        CoreError::NotFound(message.into())
    }
}

/// Error contract shared by every storage port
///
/// Adapters translate their backend failures into this type so domain code
/// and handlers stay storage-agnostic. A failed storage call is never
/// reported as success.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying persistence layer failed; retryable by the caller
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The referenced record does not exist, for operations that require it
    #[error("{0} not found")]
    NotFound(String),
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable(message.into())
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        StoreError::NotFound(entity.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
