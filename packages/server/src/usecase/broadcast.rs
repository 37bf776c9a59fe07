//! Room-scoped fan-out.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomKey, RoomRegistry, ServerEvent};

use super::error::BroadcastError;

/// Delivers an event to every current member of a room.
///
/// Members are snapshotted from the registry and handed to the pusher in one
/// call. A member that disconnects in between is skipped by the pusher.
pub struct RoomBroadcaster {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RoomBroadcaster {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// Broadcast `event` to `room`, optionally leaving out one connection.
    ///
    /// Returns the number of connections the event was handed to. An empty or
    /// unknown room yields `Ok(0)`.
    pub async fn broadcast(
        &self,
        room: &RoomKey,
        event: &ServerEvent,
        exclude: Option<&ConnectionId>,
    ) -> Result<usize, BroadcastError> {
        let targets: Vec<ConnectionId> = self
            .registry
            .members(room)
            .await
            .into_iter()
            .filter(|id| Some(id) != exclude)
            .collect();

        if targets.is_empty() {
            tracing::debug!("No recipients for '{}' in room '{}'", event.name(), room);
            return Ok(0);
        }

        self.message_pusher
            .broadcast(targets, event)
            .await
            .map_err(|source| BroadcastError::PushFailed {
                room: room.to_string(),
                source,
            })
    }
}
