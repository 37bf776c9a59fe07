//! In-memory implementations.

mod room;

pub use room::InMemoryRoomRegistry;
