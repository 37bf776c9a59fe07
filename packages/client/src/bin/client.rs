//! Taskflow realtime client.
//!
//! `chat` connects to the realtime server and sends messages from stdin.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second
//! interval).
//!
//! `push` runs the push delivery worker once on a payload read from a file or
//! stdin, as the push platform would.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin taskflow-client -- chat --room release --user-id u1
//! echo '{"title":"Hi","data":{"actionUrl":"https://x/y"}}' | cargo run --bin taskflow-client -- push --click
//! ```

use std::{io::Read, path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use taskflow_client::{
    chat::{ChatOptions, run_client},
    push::{PushError, PushWorker, TerminalOpener, TerminalPresenter},
};
use taskflow_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "taskflow-client")]
#[command(about = "Taskflow realtime chat client and push worker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive chat over WebSocket
    Chat {
        /// WebSocket server URL
        #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
        url: String,

        /// Room to join on connect
        #[arg(short = 'r', long)]
        room: Option<String>,

        /// User whose notifications to receive
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Deliver one push payload
    Push {
        /// Payload file (stdin when omitted)
        #[arg(long)]
        payload: Option<PathBuf>,

        /// Click the notification once it is shown
        #[arg(long)]
        click: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let cli = Cli::parse();

    match cli.command {
        Command::Chat { url, room, user_id } => {
            if let Err(e) = run_client(ChatOptions { url, room, user_id }).await {
                tracing::error!("Client error: {}", e);
                std::process::exit(1);
            }
        }
        Command::Push { payload, click } => {
            let raw = match read_payload(payload) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::error!("Failed to read payload: {}", e);
                    std::process::exit(1);
                }
            };
            if let Err(e) = deliver(&raw, click).await {
                tracing::error!("Push delivery failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn read_payload(path: Option<PathBuf>) -> std::io::Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path),
        None => {
            let mut raw = Vec::new();
            std::io::stdin().read_to_end(&mut raw)?;
            Ok(raw)
        }
    }
}

async fn deliver(raw: &[u8], click: bool) -> Result<(), PushError> {
    let worker = PushWorker::new(
        Arc::new(TerminalPresenter),
        Arc::new(TerminalOpener::default()),
    );

    let notification = worker.on_push(Some(raw)).await?;
    if click {
        let outcome = worker.on_notification_click(notification).await?;
        tracing::info!("Click outcome: {:?}", outcome);
    }

    Ok(())
}
