//! axum handlers and WebSocket event handlers.

pub mod events;
pub mod http;
pub mod websocket;
