//! UseCase layer: one struct per client-visible operation.
//!
//! Use cases receive their collaborators (`RoomRegistry`, `MessagePusher`,
//! `Clock`) through their constructors; nothing reaches for global state.

mod broadcast;
mod connect_connection;
mod disconnect_connection;
mod error;
mod get_rooms;
mod join_chat;
mod publish_notification;
mod send_chat_message;
mod subscribe_notifications;
mod typing;

pub use broadcast::RoomBroadcaster;
pub use connect_connection::{ConnectConnectionUseCase, ConnectedConnection};
pub use disconnect_connection::DisconnectConnectionUseCase;
pub use error::{BroadcastError, ConnectError, JoinRoomError, RoomEventError};
pub use get_rooms::GetRoomsUseCase;
pub use join_chat::JoinChatUseCase;
pub use publish_notification::PublishNotificationUseCase;
pub use send_chat_message::SendChatMessageUseCase;
pub use subscribe_notifications::SubscribeNotificationsUseCase;
pub use typing::TypingUseCase;
