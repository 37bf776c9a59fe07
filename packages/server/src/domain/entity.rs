//! Domain entities.

use serde_json::Value;

use super::value_object::{ConnectionId, RoomKey, Timestamp};

/// A chat message emitted to one room.
///
/// Transient: it is fanned out at emission time and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Connection that sent the message
    pub sender: ConnectionId,
    /// Opaque message body supplied by the client
    pub message: Value,
    /// Server-assigned emission time
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(sender: ConnectionId, message: Value, timestamp: Timestamp) -> Self {
        Self {
            sender,
            message,
            timestamp,
        }
    }
}

/// Snapshot of one live room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub key: RoomKey,
    pub members: usize,
    /// When the first current-generation member joined
    pub created_at: Timestamp,
}
