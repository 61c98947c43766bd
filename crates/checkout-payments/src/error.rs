//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Gateway rejected the request (non-2xx with an error body)
    #[error("Razorpay error: {0}")]
    Gateway(String),

    /// Transport-level failure talking to the gateway
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Payment signature did not verify
    #[error("Payment signature verification failed")]
    InvalidSignature,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
