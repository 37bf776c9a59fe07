//! Composition root: wires the in-memory ports, use cases and dispatcher
//! into a `Server`.

use std::sync::Arc;

use taskflow_shared::time::Clock;

use crate::{
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRegistry},
    ui::{Server, build_event_dispatcher},
    usecase::{
        ConnectConnectionUseCase, DisconnectConnectionUseCase, GetRoomsUseCase, JoinChatUseCase,
        PublishNotificationUseCase, RoomBroadcaster, SendChatMessageUseCase,
        SubscribeNotificationsUseCase, TypingUseCase,
    },
};

/// Build a server backed by the in-memory room registry and the WebSocket
/// message pusher.
pub fn build_server(clock: Arc<dyn Clock>) -> Server {
    // Initialize dependencies in order:
    // 1. RoomRegistry / MessagePusher
    // 2. UseCases
    // 3. Event dispatcher
    // 4. Server

    // 1. Ports
    let registry = Arc::new(InMemoryRoomRegistry::new());
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 2. UseCases
    let broadcaster = Arc::new(RoomBroadcaster::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let connect_connection_usecase = Arc::new(ConnectConnectionUseCase::new(
        message_pusher.clone(),
        clock.clone(),
    ));
    let disconnect_connection_usecase = Arc::new(DisconnectConnectionUseCase::new(
        registry.clone(),
        message_pusher,
    ));
    let join_chat_usecase = Arc::new(JoinChatUseCase::new(registry.clone(), clock.clone()));
    let send_chat_message_usecase = Arc::new(SendChatMessageUseCase::new(
        broadcaster.clone(),
        clock.clone(),
    ));
    let typing_usecase = Arc::new(TypingUseCase::new(broadcaster.clone()));
    let subscribe_notifications_usecase =
        Arc::new(SubscribeNotificationsUseCase::new(registry.clone(), clock));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(registry));
    let publish_notification_usecase = Arc::new(PublishNotificationUseCase::new(broadcaster));

    // 3. Event dispatcher
    let dispatcher = build_event_dispatcher(
        join_chat_usecase,
        send_chat_message_usecase,
        typing_usecase,
        subscribe_notifications_usecase,
    );
    tracing::debug!("Registered events: {:?}", dispatcher.events());

    // 4. Server
    Server::new(
        dispatcher,
        connect_connection_usecase,
        disconnect_connection_usecase,
        get_rooms_usecase,
        publish_notification_usecase,
    )
}
