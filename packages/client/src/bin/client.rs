//! CLI chat client for Hiroba.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- --identity 12
//! cargo run --bin hiroba-client -- --url ws://127.0.0.1:3000/ws --identity 12
//! ```

use clap::Parser;

use hiroba_client::session::run_client_session;
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "CLI chat client for Hiroba", long_about = None)]
struct Args {
    /// WebSocket URL of the chat server
    #[arg(short, long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Player identity to act as (authentication is handled upstream)
    #[arg(short, long)]
    identity: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();

    if let Err(e) = run_client_session(&args.url, &args.identity).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
