//! Conversion logic between DTOs and domain types.

use taskflow_shared::time::timestamp_to_rfc3339;

use crate::domain::{RoomSummary, ServerEvent};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain → DTO
// ========================================

impl From<&ServerEvent> for dto::ServerFrame {
    fn from(event: &ServerEvent) -> Self {
        match event {
            ServerEvent::Connected(id) => Self::Connected(dto::ConnectedPayload {
                connection_id: id.to_string(),
            }),
            ServerEvent::ChatMessage(message) => Self::ChatMessage(dto::ChatMessageBroadcast {
                sender: message.sender.to_string(),
                message: message.message.clone(),
                timestamp: timestamp_to_rfc3339(message.timestamp.value()),
            }),
            ServerEvent::Typing(id) => Self::Typing(id.to_string()),
            ServerEvent::Notification(payload) => Self::Notification(payload.clone()),
        }
    }
}

impl From<RoomSummary> for http::RoomSummaryDto {
    fn from(model: RoomSummary) -> Self {
        Self {
            key: model.key.into_string(),
            members: model.members,
            created_at: timestamp_to_rfc3339(model.created_at.value()),
        }
    }
}

/// Encode a server event as a text frame
pub fn encode_event(event: &ServerEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string(&dto::ServerFrame::from(event))
}
