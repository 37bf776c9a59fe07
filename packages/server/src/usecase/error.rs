//! UseCase error types.

use thiserror::Error;

use crate::domain::{MessagePushError, ValueObjectError};

/// Connection setup errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectError {
    /// The greeting could not be queued for the new connection
    #[error("failed to greet connection: {0}")]
    Greeting(#[from] MessagePushError),
}

/// Errors of `join:chat` and `subscribe:notifications`
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JoinRoomError {
    #[error(transparent)]
    InvalidInput(#[from] ValueObjectError),
}

/// Fan-out errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BroadcastError {
    #[error("broadcast to room '{room}' failed: {source}")]
    PushFailed {
        room: String,
        source: MessagePushError,
    },
}

/// Errors of events that fan out to a room (`chat:message`, `typing`,
/// notification publishing)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoomEventError {
    #[error(transparent)]
    InvalidInput(#[from] ValueObjectError),

    #[error(transparent)]
    Broadcast(#[from] BroadcastError),
}
