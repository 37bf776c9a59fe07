//! UseCase: `typing`

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomKey, ServerEvent};

use super::{broadcast::RoomBroadcaster, error::RoomEventError};

/// Relay a typing indicator to the other members of a room.
///
/// Fire-and-forget: no acknowledgment, and the typist never receives its own
/// indicator.
pub struct TypingUseCase {
    broadcaster: Arc<RoomBroadcaster>,
}

impl TypingUseCase {
    pub fn new(broadcaster: Arc<RoomBroadcaster>) -> Self {
        Self { broadcaster }
    }

    pub async fn execute(
        &self,
        sender: ConnectionId,
        room_id: String,
    ) -> Result<usize, RoomEventError> {
        let room = RoomKey::new(room_id)?;
        let delivered = self
            .broadcaster
            .broadcast(&room, &ServerEvent::Typing(sender), Some(&sender))
            .await?;
        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessagePusher, RoomRegistry, Timestamp},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRegistry,
        },
    };
    use serde_json::{Value, json};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_typing_reaches_others_but_not_sender() {
        // テスト項目: typing は C 以外のメンバー D に C の ID として届き、C 自身には届かない
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let usecase = TypingUseCase::new(Arc::new(RoomBroadcaster::new(
            registry.clone(),
            pusher.clone(),
        )));
        let room = RoomKey::new("r1".to_string()).unwrap();
        let c = ConnectionId::generate();
        let d = ConnectionId::generate();
        let (tx_c, mut rx_c) = mpsc::unbounded_channel();
        let (tx_d, mut rx_d) = mpsc::unbounded_channel();
        pusher.register_client(c, tx_c).await;
        pusher.register_client(d, tx_d).await;
        registry.join(c, room.clone(), Timestamp::new(0)).await;
        registry.join(d, room.clone(), Timestamp::new(0)).await;

        // when (操作):
        let result = usecase.execute(c, "r1".to_string()).await;

        // then (期待する結果):
        assert_eq!(result, Ok(1));
        let frame: Value = serde_json::from_str(&rx_d.try_recv().unwrap()).unwrap();
        assert_eq!(frame, json!({"event": "typing", "data": c.to_string()}));
        assert!(rx_c.try_recv().is_err());
    }
}
