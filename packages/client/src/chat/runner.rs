//! Client execution logic with reconnection support.

use std::{sync::Arc, time::Duration};

use crate::{
    error::ClientError,
    push::{PushWorker, TerminalOpener, TerminalPresenter},
};

use super::{
    domain::{should_attempt_reconnect, should_exit_immediately},
    session::{SessionState, run_client_session},
    ui::spawn_line_reader,
};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Options of the `chat` command
#[derive(Debug, Clone)]
pub struct ChatOptions {
    /// WebSocket endpoint, e.g. `ws://127.0.0.1:8080/ws`
    pub url: String,
    /// Room to join right after connecting
    pub room: Option<String>,
    /// User whose notifications to subscribe to right after connecting
    pub user_id: Option<String>,
}

/// Run the WebSocket client with reconnection logic
pub async fn run_client(options: ChatOptions) -> Result<(), ClientError> {
    let worker = PushWorker::new(
        Arc::new(TerminalPresenter),
        Arc::new(TerminalOpener::default()),
    );
    let mut input_rx = spawn_line_reader();
    let mut state = SessionState::new(options.room, options.user_id);
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} (attempt {}/{})",
            options.url,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&options.url, &mut state, &mut input_rx, &worker).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) if should_exit_immediately(&e) => {
                tracing::error!("{}. Exiting.", e);
                return Err(e);
            }
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(ClientError::ReconnectExhausted(MAX_RECONNECT_ATTEMPTS));
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}
