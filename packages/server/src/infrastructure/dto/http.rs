//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

/// Entry of `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub key: String,
    pub members: usize,
    /// RFC 3339, UTC
    pub created_at: String,
}

/// Response of `POST /api/notifications/{user_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishNotificationResponse {
    /// Number of connections the notification was handed to
    pub delivered: usize,
}
