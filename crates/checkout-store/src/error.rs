//! Store Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence-layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record matched the lookup
    #[error("Subscription not found")]
    NotFound,

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Configuration error (bad URI, missing database name)
    #[error("Configuration error: {0}")]
    Config(String),
}
