//! WebSocket `MessagePusher` implementation.
//!
//! ## Responsibilities
//!
//! - Owns the `UnboundedSender` of every live connection
//! - Encodes server events into text frames and enqueues them
//!
//! The sockets themselves are created by the UI layer
//! (`ui/handler/websocket.rs`), which drains each receiver into its socket.
//! Enqueueing never waits on a recipient, so one slow connection cannot stall
//! a broadcast.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, ServerEvent},
    infrastructure::dto::conversion::encode_event,
};

/// WebSocket-backed `MessagePusher`
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::new(Arc::new(Mutex::new(HashMap::new())));
/// pusher.register_client(connection_id, tx).await;
/// pusher.push_to(&connection_id, &ServerEvent::Connected(connection_id)).await?;
/// ```
pub struct WebSocketMessagePusher {
    /// Outbound channel of every live connection
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &ServerEvent,
    ) -> Result<(), MessagePushError> {
        let frame = encode_event(event).map_err(|e| MessagePushError::Encode(e.to_string()))?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;
        sender
            .send(frame)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed '{}' to connection '{}'", event.name(), connection_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &ServerEvent,
    ) -> Result<usize, MessagePushError> {
        let frame = encode_event(event).map_err(|e| MessagePushError::Encode(e.to_string()))?;
        let clients = self.clients.lock().await;

        let mut delivered = 0;
        for target in targets {
            match clients.get(&target) {
                Some(sender) => {
                    // a closed channel means the connection is going away
                    if let Err(e) = sender.send(frame.clone()) {
                        tracing::warn!("Failed to push '{}' to '{}': {}", event.name(), target, e);
                    } else {
                        delivered += 1;
                    }
                }
                None => {
                    tracing::warn!(
                        "Connection '{}' not found during broadcast, skipping",
                        target
                    );
                }
            }
        }

        tracing::debug!("Broadcasted '{}' to {} connection(s)", event.name(), delivered);
        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - WebSocketMessagePusher の push_to / broadcast
    //
    // 【なぜこのテストが必要か】
    // - すべてのファンアウトはこの実装を通る
    // - 切断済みの接続が混ざっていても残りのメンバーに届くことを保証する
    //
    // 【どのようなシナリオをテストするか】
    // 1. push_to の成功 / 存在しないクライアント
    // 2. broadcast の成功
    // 3. broadcast 中に登録解除済み・受信側クローズ済みの接続が混ざるケース
    // 4. 空のターゲット
    // ========================================

    fn create_test_pusher() -> (
        WebSocketMessagePusher,
        Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
    ) {
        let clients = Arc::new(Mutex::new(HashMap::new()));
        let pusher = WebSocketMessagePusher::new(clients.clone());
        (pusher, clients)
    }

    fn parse(frame: Option<String>) -> Value {
        serde_json::from_str(&frame.expect("frame expected")).unwrap()
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定の接続にイベントを送信できる
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let alice = ConnectionId::generate();
        pusher.register_client(alice, tx).await;

        // when (操作):
        let result = pusher.push_to(&alice, &ServerEvent::Typing(alice)).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            parse(rx.recv().await),
            json!({"event": "typing", "data": alice.to_string()})
        );
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 存在しない接続への送信は ClientNotFound を返す
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let ghost = ConnectionId::generate();

        // when (操作):
        let result = pusher.push_to(&ghost, &ServerEvent::Typing(ghost)).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MessagePushError::ClientNotFound(ghost.to_string()))
        );
    }

    #[tokio::test]
    async fn test_broadcast_success() {
        // テスト項目: 複数の接続にイベントをブロードキャストできる
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        pusher.register_client(alice, tx1).await;
        pusher.register_client(bob, tx2).await;
        let event = ServerEvent::Notification(json!({"title": "t"}));

        // when (操作):
        let result = pusher.broadcast(vec![alice, bob], &event).await;

        // then (期待する結果):
        assert_eq!(result, Ok(2));
        let expected = json!({"event": "notification", "data": {"title": "t"}});
        assert_eq!(parse(rx1.recv().await), expected);
        assert_eq!(parse(rx2.recv().await), expected);
    }

    #[tokio::test]
    async fn test_broadcast_skips_departed_connections() {
        // テスト項目: ブロードキャスト中に切断された接続はスキップされ、残りには届く
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx_alive, mut rx_alive) = mpsc::unbounded_channel();
        let (tx_closed, rx_closed) = mpsc::unbounded_channel();
        let alive = ConnectionId::generate();
        let closed = ConnectionId::generate();
        let unregistered = ConnectionId::generate();
        pusher.register_client(alive, tx_alive).await;
        pusher.register_client(closed, tx_closed).await;
        drop(rx_closed);

        // when (操作):
        let result = pusher
            .broadcast(
                vec![unregistered, closed, alive],
                &ServerEvent::Typing(unregistered),
            )
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(1));
        assert!(rx_alive.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_broadcast_empty_targets() {
        // テスト項目: 空のターゲットリストでもエラーにならない
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();

        // when (操作):
        let result = pusher
            .broadcast(vec![], &ServerEvent::Notification(Value::Null))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(0));
    }

    #[tokio::test]
    async fn test_unregister_client_stops_delivery() {
        // テスト項目: 登録解除後の接続には push_to できない
        // given (前提条件):
        let (pusher, clients) = create_test_pusher();
        let (tx, _rx) = mpsc::unbounded_channel();
        let alice = ConnectionId::generate();
        pusher.register_client(alice, tx).await;

        // when (操作):
        pusher.unregister_client(&alice).await;

        // then (期待する結果):
        assert!(clients.lock().await.is_empty());
        assert!(
            pusher
                .push_to(&alice, &ServerEvent::Typing(alice))
                .await
                .is_err()
        );
    }
}
