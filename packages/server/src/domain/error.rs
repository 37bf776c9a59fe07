//! Domain error types.

use thiserror::Error;

/// Value object validation errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Room keys must not be empty
    #[error("room key must not be empty")]
    EmptyRoomKey,

    /// User IDs must not be empty
    #[error("user id must not be empty")]
    EmptyUserId,

    /// Connection IDs are UUIDs
    #[error("invalid connection id '{0}'")]
    InvalidConnectionId(String),
}

/// Errors raised while pushing events to connected clients
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessagePushError {
    /// The target connection is not registered
    #[error("client '{0}' not found")]
    ClientNotFound(String),

    /// The outbound channel of the target connection is closed
    #[error("push failed: {0}")]
    PushFailed(String),

    /// The event could not be encoded for the wire
    #[error("failed to encode event: {0}")]
    Encode(String),
}
