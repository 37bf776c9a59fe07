//! Interactive WebSocket chat client.

mod command;
mod domain;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::{ChatOptions, run_client};
pub use session::{SessionState, run_client_session};
