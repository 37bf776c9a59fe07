//! WebSocket client session management.

use std::ops::ControlFlow;

use futures_util::{Sink, SinkExt, StreamExt};
use serde_json::Value;
use taskflow_server::infrastructure::dto::websocket::{
    ChatMessageRequest, ClientFrame, ServerFrame,
};
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{Error as WsError, protocol::Message},
};

use crate::{
    error::ClientError,
    push::{PushPayload, PushWorker},
};

use super::{
    command::{self, Command, HELP},
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

/// What a session has set up, carried across reconnects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Room that chat messages and typing go to
    pub room: Option<String>,
    /// User whose notifications this client receives
    pub user_id: Option<String>,
    connection_id: Option<String>,
}

impl SessionState {
    pub fn new(room: Option<String>, user_id: Option<String>) -> Self {
        Self {
            room,
            user_id,
            connection_id: None,
        }
    }

    /// Id assigned by the server on the current connection
    pub fn connection_id(&self) -> Option<&str> {
        self.connection_id.as_deref()
    }
}

/// Run one WebSocket client session.
///
/// Rejoins `state.room` and resubscribes `state.user_id` once connected.
/// Returns `Ok(())` when the user quits (`/quit`, Ctrl+C, Ctrl+D) and an error
/// when the connection fails or is lost.
pub async fn run_client_session(
    url: &str,
    state: &mut SessionState,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    worker: &PushWorker,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url).await.map_err(|e| match e {
        WsError::Http(response) => ClientError::Rejected(response.status().as_u16()),
        other => ClientError::ConnectionError(other.to_string()),
    })?;

    tracing::info!("Connected to realtime server!");
    println!(
        "\nType messages and press Enter to send. /help lists commands. Press Ctrl+C to exit.\n"
    );

    let (mut write, mut read) = ws_stream.split();
    state.connection_id = None;

    if let Some(room) = state.room.clone() {
        send_frame(&mut write, &ClientFrame::JoinChat(room.clone())).await?;
        print!("{}", MessageFormatter::format_joined(&room));
    }
    if let Some(user_id) = state.user_id.clone() {
        send_frame(&mut write, &ClientFrame::SubscribeNotifications(user_id.clone())).await?;
        print!("{}", MessageFormatter::format_subscribed(&user_id));
    }

    loop {
        tokio::select! {
            incoming = read.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    handle_server_text(text.as_str(), state, worker).await;
                    redisplay_prompt();
                }
                Some(Ok(Message::Binary(data))) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt();
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ConnectionError("Connection lost".to_string()));
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionError(e.to_string()));
                }
                Some(Ok(_)) => {}
            },
            line = input_rx.recv() => {
                let Some(line) = line else {
                    write.send(Message::Close(None)).await.ok();
                    return Ok(());
                };

                match command::parse(&line) {
                    Ok(command) => {
                        if handle_command(command, state, &mut write).await?.is_break() {
                            write.send(Message::Close(None)).await.ok();
                            return Ok(());
                        }
                    }
                    Err(e) => println!("{}", e),
                }
                redisplay_prompt();
            }
        }
    }
}

/// Display (or deliver) one frame received from the server
async fn handle_server_text(text: &str, state: &mut SessionState, worker: &PushWorker) {
    match serde_json::from_str::<ServerFrame>(text) {
        Ok(ServerFrame::Connected(payload)) => {
            print!("{}", MessageFormatter::format_connected(&payload.connection_id));
            state.connection_id = Some(payload.connection_id);
        }
        Ok(ServerFrame::ChatMessage(chat)) => {
            let is_me = state.connection_id() == Some(chat.sender.as_str());
            print!(
                "{}",
                MessageFormatter::format_chat_message(
                    &chat.sender,
                    &chat.message,
                    &chat.timestamp,
                    is_me
                )
            );
        }
        Ok(ServerFrame::Typing(sender)) => {
            print!("{}", MessageFormatter::format_typing(&sender));
        }
        Ok(ServerFrame::Notification(payload)) => {
            if let Err(e) = worker.present(PushPayload::from_value(&payload)).await {
                tracing::warn!("Failed to present notification: {}", e);
            }
        }
        Err(_) => {
            print!("{}", MessageFormatter::format_raw_message(text));
        }
    }
}

/// Apply one prompt command. `Break` ends the session.
async fn handle_command<S>(
    command: Command,
    state: &mut SessionState,
    write: &mut S,
) -> Result<ControlFlow<()>, ClientError>
where
    S: Sink<Message, Error = WsError> + Unpin,
{
    match command {
        Command::Join(room) => {
            send_frame(write, &ClientFrame::JoinChat(room.clone())).await?;
            print!("{}", MessageFormatter::format_joined(&room));
            state.room = Some(room);
        }
        Command::Subscribe(user_id) => {
            send_frame(write, &ClientFrame::SubscribeNotifications(user_id.clone())).await?;
            print!("{}", MessageFormatter::format_subscribed(&user_id));
            state.user_id = Some(user_id);
        }
        Command::Typing => match &state.room {
            Some(room) => send_frame(write, &ClientFrame::Typing(room.clone())).await?,
            None => println!("Join a room first with /join <room>"),
        },
        Command::Say(text) => match &state.room {
            Some(room) => {
                let frame = ClientFrame::ChatMessage(ChatMessageRequest {
                    room_id: room.clone(),
                    message: Value::String(text),
                });
                send_frame(write, &frame).await?;
            }
            None => println!("Join a room first with /join <room>"),
        },
        Command::Help => print!("{}", HELP),
        Command::Quit => return Ok(ControlFlow::Break(())),
    }

    Ok(ControlFlow::Continue(()))
}

async fn send_frame<S>(write: &mut S, frame: &ClientFrame) -> Result<(), ClientError>
where
    S: Sink<Message, Error = WsError> + Unpin,
{
    let json = match serde_json::to_string(frame) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize frame: {}", e);
            return Ok(());
        }
    };

    write.send(Message::Text(json.into())).await.map_err(|e| {
        tracing::warn!("Failed to send frame: {}", e);
        ClientError::ConnectionError(e.to_string())
    })
}
