//! Error types for the gateway crate

use thiserror::Error;

/// Transport-level errors
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Channel closed")]
    ChannelClosed,
}

/// Gateway-level errors (adapter operations)
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Failed to read recording: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid recording: {0}")]
    Recording(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Serialization(e.to_string())
    }
}
