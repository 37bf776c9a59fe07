//! Utilities shared by the Taskflow realtime server and client.

pub mod logger;
pub mod time;
