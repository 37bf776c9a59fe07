//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectConnectionUseCase, DisconnectConnectionUseCase, GetRoomsUseCase,
    PublishNotificationUseCase,
};

use super::dispatch::EventDispatcher;

/// State shared by every axum handler
pub struct AppState {
    /// Routes inbound WebSocket events to their handlers
    pub dispatcher: Arc<EventDispatcher>,
    pub connect_connection_usecase: Arc<ConnectConnectionUseCase>,
    pub disconnect_connection_usecase: Arc<DisconnectConnectionUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub publish_notification_usecase: Arc<PublishNotificationUseCase>,
}
