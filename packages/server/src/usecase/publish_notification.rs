//! UseCase: deliver a notification to a user's topic

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{RoomKey, ServerEvent, UserId};

use super::{broadcast::RoomBroadcaster, error::RoomEventError};

/// Publish a notification payload to every connection subscribed to
/// `notif:{user_id}`.
pub struct PublishNotificationUseCase {
    broadcaster: Arc<RoomBroadcaster>,
}

impl PublishNotificationUseCase {
    pub fn new(broadcaster: Arc<RoomBroadcaster>) -> Self {
        Self { broadcaster }
    }

    pub async fn execute(&self, user_id: String, payload: Value) -> Result<usize, RoomEventError> {
        let topic = RoomKey::notification_topic(&UserId::new(user_id)?);
        let delivered = self
            .broadcaster
            .broadcast(&topic, &ServerEvent::Notification(payload), None)
            .await?;
        tracing::info!("Notification published to '{}' ({} connection(s))", topic, delivered);
        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionId, MessagePusher},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRegistry,
        },
        usecase::SubscribeNotificationsUseCase,
    };
    use serde_json::json;
    use taskflow_shared::time::FixedClock;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_publish_reaches_only_subscribed_user() {
        // テスト項目: notif:u1 への配信は u1 の購読者に届き、u2 の購読者には届かない
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let pusher = Arc::new(WebSocketMessagePusher::default());
        let subscribe =
            SubscribeNotificationsUseCase::new(registry.clone(), Arc::new(FixedClock::new(0)));
        let usecase = PublishNotificationUseCase::new(Arc::new(RoomBroadcaster::new(
            registry.clone(),
            pusher.clone(),
        )));
        let (u1_conn, u2_conn) = (ConnectionId::generate(), ConnectionId::generate());
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_client(u1_conn, tx1).await;
        pusher.register_client(u2_conn, tx2).await;
        subscribe.execute(u1_conn, "u1".to_string()).await.unwrap();
        subscribe.execute(u2_conn, "u2".to_string()).await.unwrap();

        // when (操作):
        let result = usecase
            .execute("u1".to_string(), json!({"title": "Task assigned"}))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(1));
        let frame: Value = serde_json::from_str(&rx1.try_recv().unwrap()).unwrap();
        assert_eq!(
            frame,
            json!({"event": "notification", "data": {"title": "Task assigned"}})
        );
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_noop() {
        // テスト項目: 購読者のいないユーザーへの配信はエラーにならず配信数 0 になる
        // given (前提条件):
        let usecase = PublishNotificationUseCase::new(Arc::new(RoomBroadcaster::new(
            Arc::new(InMemoryRoomRegistry::new()),
            Arc::new(WebSocketMessagePusher::default()),
        )));

        // when (操作):
        let result = usecase.execute("u9".to_string(), json!({})).await;

        // then (期待する結果):
        assert_eq!(result, Ok(0));
    }
}
