//! Handlers of the client → server WebSocket events.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    domain::ConnectionId,
    infrastructure::dto::websocket::{ChatMessageRequest, event_name},
    ui::dispatch::{DispatchError, EventDispatcher, EventHandler, parse_payload},
    usecase::{
        JoinChatUseCase, SendChatMessageUseCase, SubscribeNotificationsUseCase, TypingUseCase,
    },
};

/// `join:chat` handler, data: room ID
pub struct JoinChatHandler {
    usecase: Arc<JoinChatUseCase>,
}

#[async_trait]
impl EventHandler for JoinChatHandler {
    async fn handle(&self, connection_id: ConnectionId, data: Value) -> Result<(), DispatchError> {
        let room_id: String = parse_payload(event_name::JOIN_CHAT, data)?;
        self.usecase.execute(connection_id, room_id).await?;
        Ok(())
    }
}

/// `chat:message` handler, data: `{ roomId, message }`
pub struct ChatMessageHandler {
    usecase: Arc<SendChatMessageUseCase>,
}

#[async_trait]
impl EventHandler for ChatMessageHandler {
    async fn handle(&self, connection_id: ConnectionId, data: Value) -> Result<(), DispatchError> {
        let request: ChatMessageRequest = parse_payload(event_name::CHAT_MESSAGE, data)?;
        self.usecase
            .execute(connection_id, request.room_id, request.message)
            .await?;
        Ok(())
    }
}

/// `typing` handler, data: room ID
pub struct TypingHandler {
    usecase: Arc<TypingUseCase>,
}

#[async_trait]
impl EventHandler for TypingHandler {
    async fn handle(&self, connection_id: ConnectionId, data: Value) -> Result<(), DispatchError> {
        let room_id: String = parse_payload(event_name::TYPING, data)?;
        self.usecase.execute(connection_id, room_id).await?;
        Ok(())
    }
}

/// `subscribe:notifications` handler, data: user ID
pub struct SubscribeNotificationsHandler {
    usecase: Arc<SubscribeNotificationsUseCase>,
}

#[async_trait]
impl EventHandler for SubscribeNotificationsHandler {
    async fn handle(&self, connection_id: ConnectionId, data: Value) -> Result<(), DispatchError> {
        let user_id: String = parse_payload(event_name::SUBSCRIBE_NOTIFICATIONS, data)?;
        self.usecase.execute(connection_id, user_id).await?;
        Ok(())
    }
}

/// Build the dispatcher for the chat and notification channels
pub fn build_event_dispatcher(
    join_chat_usecase: Arc<JoinChatUseCase>,
    send_chat_message_usecase: Arc<SendChatMessageUseCase>,
    typing_usecase: Arc<TypingUseCase>,
    subscribe_notifications_usecase: Arc<SubscribeNotificationsUseCase>,
) -> EventDispatcher {
    EventDispatcher::new()
        .register(
            event_name::JOIN_CHAT,
            Arc::new(JoinChatHandler {
                usecase: join_chat_usecase,
            }),
        )
        .register(
            event_name::CHAT_MESSAGE,
            Arc::new(ChatMessageHandler {
                usecase: send_chat_message_usecase,
            }),
        )
        .register(
            event_name::TYPING,
            Arc::new(TypingHandler {
                usecase: typing_usecase,
            }),
        )
        .register(
            event_name::SUBSCRIBE_NOTIFICATIONS,
            Arc::new(SubscribeNotificationsHandler {
                usecase: subscribe_notifications_usecase,
            }),
        )
}
