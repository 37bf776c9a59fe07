//! Events the server emits to connected clients.

use serde_json::Value;

use super::{entity::ChatMessage, value_object::ConnectionId};

/// Server → client event
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// Greeting carrying the identifier assigned to the connection
    Connected(ConnectionId),
    /// A chat message, echoed to its sender as well
    ChatMessage(ChatMessage),
    /// Typing indicator carrying the typist's connection ID
    Typing(ConnectionId),
    /// Notification delivered to a user's topic
    Notification(Value),
}

impl ServerEvent {
    /// Event name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Connected(_) => "connected",
            ServerEvent::ChatMessage(_) => "chat:message",
            ServerEvent::Typing(_) => "typing",
            ServerEvent::Notification(_) => "notification",
        }
    }
}
