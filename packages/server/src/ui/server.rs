//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectConnectionUseCase, DisconnectConnectionUseCase, GetRoomsUseCase,
    PublishNotificationUseCase,
};

use super::{
    dispatch::EventDispatcher,
    handler::{
        http::{get_rooms, health_check, publish_notification},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Realtime messaging server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     dispatcher,
///     connect_connection_usecase,
///     disconnect_connection_usecase,
///     get_rooms_usecase,
///     publish_notification_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `dispatcher` - Table of WebSocket event handlers
    /// * `connect_connection_usecase` - UseCase for connection setup
    /// * `disconnect_connection_usecase` - UseCase for connection teardown
    /// * `get_rooms_usecase` - UseCase for listing rooms
    /// * `publish_notification_usecase` - UseCase for notification delivery
    pub fn new(
        dispatcher: EventDispatcher,
        connect_connection_usecase: Arc<ConnectConnectionUseCase>,
        disconnect_connection_usecase: Arc<DisconnectConnectionUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        publish_notification_usecase: Arc<PublishNotificationUseCase>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                dispatcher: Arc::new(dispatcher),
                connect_connection_usecase,
                disconnect_connection_usecase,
                get_rooms_usecase,
                publish_notification_usecase,
            }),
        }
    }

    /// Build the axum router
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route(
                "/api/notifications/{user_id}",
                post(publish_notification),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server on `host:port` until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Realtime server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
