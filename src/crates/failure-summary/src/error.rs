//! Error types for summary configuration and output.

use thiserror::Error;

/// Result type for summary operations.
pub type Result<T> = std::result::Result<T, SummaryError>;

/// Errors that can occur while configuring or emitting summaries.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
