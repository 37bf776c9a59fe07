//! Taskflow realtime client.
//!
//! - `chat`: interactive WebSocket client with reconnection support
//! - `push`: push notification delivery worker

pub mod chat;
pub mod error;
pub mod push;
