use std::time::Duration;
use thiserror::Error;

/// Failures that happen before a response body is in hand.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Context cancelled")]
    Cancelled,

    #[error("Context deadline exceeded")]
    DeadlineExceeded,
}

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to decode notify response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Notify rejected alert (status {status}): {message}")]
    Rejected { status: i64, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AlertError {
    pub fn is_transport(&self) -> bool {
        matches!(self, AlertError::Transport(_))
    }

    /// True when the call gave up because its context was cancelled or its
    /// deadline passed.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            AlertError::Transport(
                TransportError::Cancelled
                    | TransportError::DeadlineExceeded
                    | TransportError::Timeout(_)
            )
        )
    }
}

pub type Result<T> = std::result::Result<T, AlertError>;
