//! Domain layer: value objects, entities, events and the ports the use cases
//! depend on.

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, RoomSummary};
pub use error::{MessagePushError, ValueObjectError};
pub use event::ServerEvent;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::RoomRegistry;
pub use value_object::{ConnectionId, NOTIFICATION_TOPIC_PREFIX, RoomKey, Timestamp, UserId};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
#[cfg(test)]
pub use repository::MockRoomRegistry;
