//! Inbound event dispatch.
//!
//! A table maps each event name to its handler. The WebSocket reader hands
//! every text frame to `EventDispatcher::dispatch`, which decodes the
//! envelope and invokes the handler registered for its `event`.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::{
    domain::ConnectionId,
    infrastructure::dto::websocket::EventEnvelope,
    usecase::{JoinRoomError, RoomEventError},
};

/// Errors of one inbound frame. None of them closes the connection.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("malformed frame: {0}")]
    MalformedFrame(#[source] serde_json::Error),

    #[error("unknown event '{0}'")]
    UnknownEvent(String),

    #[error("invalid payload for '{event}': {source}")]
    InvalidPayload {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    JoinRoom(#[from] JoinRoomError),

    #[error(transparent)]
    RoomEvent(#[from] RoomEventError),
}

/// Handler of one client → server event
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, connection_id: ConnectionId, data: Value) -> Result<(), DispatchError>;
}

/// Decode an event payload into its typed form
pub fn parse_payload<T: DeserializeOwned>(
    event: &'static str,
    data: Value,
) -> Result<T, DispatchError> {
    serde_json::from_value(data).map_err(|source| DispatchError::InvalidPayload { event, source })
}

/// Event name → handler table
#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<&'static str, Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event`, replacing any previous one
    pub fn register(mut self, event: &'static str, handler: Arc<dyn EventHandler>) -> Self {
        self.handlers.insert(event, handler);
        self
    }

    /// Names of every registered event
    pub fn events(&self) -> Vec<&'static str> {
        let mut events: Vec<_> = self.handlers.keys().copied().collect();
        events.sort_unstable();
        events
    }

    /// Decode a text frame and run the matching handler to completion
    pub async fn dispatch(&self, connection_id: ConnectionId, text: &str) -> Result<(), DispatchError> {
        let envelope: EventEnvelope =
            serde_json::from_str(text).map_err(DispatchError::MalformedFrame)?;

        let handler = self
            .handlers
            .get(envelope.event.as_str())
            .ok_or_else(|| DispatchError::UnknownEvent(envelope.event.clone()))?;

        tracing::debug!(
            "Dispatching '{}' from connection '{}'",
            envelope.event,
            connection_id
        );
        handler.handle(connection_id, envelope.data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::sync::Mutex;

    /// Handler that records what it was invoked with
    #[derive(Default)]
    struct RecordingHandler {
        calls: Mutex<Vec<(ConnectionId, Value)>>,
    }

    #[async_trait]
    impl EventHandler for RecordingHandler {
        async fn handle(&self, connection_id: ConnectionId, data: Value) -> Result<(), DispatchError> {
            let room: String = parse_payload("typing", data.clone())?;
            assert!(!room.is_empty());
            self.calls.lock().await.push((connection_id, data));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_dispatch_routes_by_event_name() {
        // テスト項目: イベント名に対応するハンドラに接続 ID と data が渡される
        // given (前提条件):
        let handler = Arc::new(RecordingHandler::default());
        let dispatcher = EventDispatcher::new().register("typing", handler.clone());
        let alice = ConnectionId::generate();

        // when (操作):
        let result = dispatcher
            .dispatch(alice, r#"{"event":"typing","data":"r1"}"#)
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(*handler.calls.lock().await, vec![(alice, json!("r1"))]);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_event() {
        // テスト項目: 未登録のイベントは UnknownEvent になる
        // given (前提条件):
        let dispatcher = EventDispatcher::new();

        // when (操作):
        let result = dispatcher
            .dispatch(ConnectionId::generate(), r#"{"event":"leave:chat","data":"r1"}"#)
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(DispatchError::UnknownEvent(name)) if name == "leave:chat"));
    }

    #[tokio::test]
    async fn test_dispatch_malformed_frame() {
        // テスト項目: JSON でないフレームは MalformedFrame になる
        // given (前提条件):
        let dispatcher = EventDispatcher::new();

        // when (操作):
        let result = dispatcher.dispatch(ConnectionId::generate(), "hello").await;

        // then (期待する結果):
        assert!(matches!(result, Err(DispatchError::MalformedFrame(_))));
    }

    #[tokio::test]
    async fn test_dispatch_invalid_payload() {
        // テスト項目: 型の合わない data は InvalidPayload になり、ハンドラの副作用は起きない
        // given (前提条件):
        let handler = Arc::new(RecordingHandler::default());
        let dispatcher = EventDispatcher::new().register("typing", handler.clone());

        // when (操作):
        let result = dispatcher
            .dispatch(ConnectionId::generate(), r#"{"event":"typing","data":{"roomId":1}}"#)
            .await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(DispatchError::InvalidPayload { event: "typing", .. })
        ));
        assert!(handler.calls.lock().await.is_empty());
    }
}
