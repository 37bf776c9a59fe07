//! UI layer: axum transport, WebSocket event dispatch and HTTP API.

pub mod dispatch;
mod handler;
mod server;
mod signal;
pub mod state;

pub use dispatch::{DispatchError, EventDispatcher, EventHandler};
pub use handler::events::build_event_dispatcher;
pub use server::Server;
