//! UseCase: `subscribe:notifications`

use std::sync::Arc;

use taskflow_shared::time::Clock;

use crate::domain::{ConnectionId, RoomKey, RoomRegistry, Timestamp, UserId};

use super::error::JoinRoomError;

/// Subscribe a connection to a user's notification topic (`notif:{user_id}`).
///
/// There is no unsubscribe; the subscription ends with the connection. The
/// caller is trusted to subscribe only to its own user's topic.
pub struct SubscribeNotificationsUseCase {
    registry: Arc<dyn RoomRegistry>,
    clock: Arc<dyn Clock>,
}

impl SubscribeNotificationsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        user_id: String,
    ) -> Result<RoomKey, JoinRoomError> {
        let topic = RoomKey::notification_topic(&UserId::new(user_id)?);
        self.registry
            .join(
                connection_id,
                topic.clone(),
                Timestamp::new(self.clock.now_millis()),
            )
            .await;
        tracing::info!("Connection '{}' subscribed to '{}'", connection_id, topic);
        Ok(topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockRoomRegistry, ValueObjectError},
        infrastructure::repository::InMemoryRoomRegistry,
    };
    use taskflow_shared::time::FixedClock;

    #[tokio::test]
    async fn test_subscribe_joins_prefixed_topic() {
        // テスト項目: 通知購読で notif:{userId} のルームに参加する
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let usecase =
            SubscribeNotificationsUseCase::new(registry.clone(), Arc::new(FixedClock::new(0)));
        let alice = ConnectionId::generate();

        // when (操作):
        let topic = usecase.execute(alice, "u1".to_string()).await.unwrap();

        // then (期待する結果):
        assert_eq!(topic.as_str(), "notif:u1");
        assert_eq!(registry.rooms_of(&alice).await, vec![topic]);
    }

    #[tokio::test]
    async fn test_subscribe_rejects_empty_user_id_without_touching_registry() {
        // テスト項目: 空のユーザー ID は拒否され、レジストリは呼ばれない
        // given (前提条件):
        let mut registry = MockRoomRegistry::new();
        registry.expect_join().never();
        let usecase =
            SubscribeNotificationsUseCase::new(Arc::new(registry), Arc::new(FixedClock::new(0)));

        // when (操作):
        let result = usecase
            .execute(ConnectionId::generate(), String::new())
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(JoinRoomError::InvalidInput(ValueObjectError::EmptyUserId))
        );
    }
}
