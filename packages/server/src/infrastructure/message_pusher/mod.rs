//! Message pusher implementations.
//!
//! - `websocket`: per-connection channels drained into WebSocket sinks

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
