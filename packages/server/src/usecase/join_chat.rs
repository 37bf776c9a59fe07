//! UseCase: `join:chat`

use std::sync::Arc;

use taskflow_shared::time::Clock;

use crate::domain::{ConnectionId, RoomKey, RoomRegistry, Timestamp};

use super::error::JoinRoomError;

/// Join a chat room.
///
/// Any non-empty room ID is accepted. Whether the connection may enter the
/// room is decided before the connection is established, not here.
pub struct JoinChatUseCase {
    registry: Arc<dyn RoomRegistry>,
    clock: Arc<dyn Clock>,
}

impl JoinChatUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        room_id: String,
    ) -> Result<RoomKey, JoinRoomError> {
        let room = RoomKey::new(room_id)?;
        self.registry
            .join(
                connection_id,
                room.clone(),
                Timestamp::new(self.clock.now_millis()),
            )
            .await;
        tracing::info!("Connection '{}' joined chat room '{}'", connection_id, room);
        Ok(room)
    }
}
