//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;

use crate::{
    infrastructure::dto::http::{PublishNotificationResponse, RoomSummaryDto},
    ui::state::AppState,
    usecase::RoomEventError,
};

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// List live rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;
    Json(rooms.into_iter().map(RoomSummaryDto::from).collect())
}

/// Publish a notification to `notif:{user_id}`
pub async fn publish_notification(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<PublishNotificationResponse>, StatusCode> {
    match state
        .publish_notification_usecase
        .execute(user_id, payload)
        .await
    {
        Ok(delivered) => Ok(Json(PublishNotificationResponse { delivered })),
        Err(RoomEventError::InvalidInput(e)) => {
            tracing::warn!("Rejected notification: {}", e);
            Err(StatusCode::BAD_REQUEST)
        }
        Err(RoomEventError::Broadcast(e)) => {
            tracing::error!("Failed to publish notification: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
