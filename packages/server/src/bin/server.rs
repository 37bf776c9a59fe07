//! Taskflow realtime server.
//!
//! Chat rooms, typing indicators and per-user notification topics over
//! WebSocket.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin taskflow-server
//! cargo run --bin taskflow-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use taskflow_server::bootstrap::build_server;
use taskflow_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "taskflow-server")]
#[command(about = "Realtime chat and notification server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let server = build_server(Arc::new(SystemClock));
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
