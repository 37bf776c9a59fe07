//! Realtime messaging core for Taskflow.
//!
//! Chat rooms, typing indicators and per-user notification topics carried
//! over a persistent WebSocket connection, with room-scoped fan-out.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// composition root
pub mod bootstrap;
