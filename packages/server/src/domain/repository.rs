//! Room registry port.
//!
//! The use case layer depends on this trait; the infrastructure layer provides
//! the implementation.

use async_trait::async_trait;

use super::{ConnectionId, RoomKey, RoomSummary, Timestamp};

/// Membership of connections in broadcast rooms.
///
/// Rooms exist implicitly: joining creates one, and it is gone once its last
/// member leaves. State is not persisted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Add a connection to a room. Returns `false` if it was already a member.
    async fn join(&self, connection_id: ConnectionId, room: RoomKey, joined_at: Timestamp) -> bool;

    /// Remove a connection from every room it joined, returning those rooms
    async fn leave_all(&self, connection_id: &ConnectionId) -> Vec<RoomKey>;

    /// Current members of a room (empty for unknown rooms)
    async fn members(&self, room: &RoomKey) -> Vec<ConnectionId>;

    /// Rooms the connection currently belongs to
    async fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<RoomKey>;

    /// Summaries of every live room
    async fn list_rooms(&self) -> Vec<RoomSummary>;
}
