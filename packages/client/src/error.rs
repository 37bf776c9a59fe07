//! Error types for the Taskflow client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered the WebSocket handshake with an HTTP error
    #[error("Server rejected the connection with HTTP {0}")]
    Rejected(u16),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Reconnection attempts are used up
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectExhausted(u32),
}
