//! WebSocket event frames.
//!
//! Every frame is a JSON envelope `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event names used on the wire
pub mod event_name {
    pub const JOIN_CHAT: &str = "join:chat";
    pub const CHAT_MESSAGE: &str = "chat:message";
    pub const TYPING: &str = "typing";
    pub const SUBSCRIBE_NOTIFICATIONS: &str = "subscribe:notifications";
    pub const CONNECTED: &str = "connected";
    pub const NOTIFICATION: &str = "notification";
}

/// Untyped inbound envelope; the dispatcher routes on `event`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EventEnvelope {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

/// `chat:message` payload sent by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageRequest {
    pub room_id: String,
    #[serde(default)]
    pub message: Value,
}

/// Client → server frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientFrame {
    #[serde(rename = "join:chat")]
    JoinChat(String),
    #[serde(rename = "chat:message")]
    ChatMessage(ChatMessageRequest),
    #[serde(rename = "typing")]
    Typing(String),
    #[serde(rename = "subscribe:notifications")]
    SubscribeNotifications(String),
}

/// `connected` payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedPayload {
    pub connection_id: String,
}

/// `chat:message` payload broadcast to a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageBroadcast {
    pub sender: String,
    pub message: Value,
    /// RFC 3339, UTC
    pub timestamp: String,
}

/// Server → client frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerFrame {
    #[serde(rename = "connected")]
    Connected(ConnectedPayload),
    #[serde(rename = "chat:message")]
    ChatMessage(ChatMessageBroadcast),
    #[serde(rename = "typing")]
    Typing(String),
    #[serde(rename = "notification")]
    Notification(Value),
}
