//! Realtime chat and room-membership server for Hiroba.
//!
//! Multiplexes connected clients into shared rooms (global, private, party,
//! battle) over WebSocket, with an invitation handshake in front of private
//! rooms.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use hiroba_server::{
    infrastructure::{
        directory::PassthroughPlayerDirectory, message_pusher::WebSocketEventPusher,
        repository::InMemoryChatStore,
    },
    ui::{AppState, Server},
};
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Realtime chat and room server for Hiroba", long_about = None)]
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

    // Initialize dependencies in order:
    // 1. Repository (in-memory message store)
    // 2. EventPusher (connection registry, starts empty on every boot)
    // 3. PlayerDirectory (identity passthrough until the character service is wired)
    // 4. AppState (use cases) and Server
    let store = Arc::new(InMemoryChatStore::new());
    let pusher = Arc::new(WebSocketEventPusher::new());
    let directory = Arc::new(PassthroughPlayerDirectory);

    let state = Arc::new(AppState::new(store, pusher, directory));

    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
