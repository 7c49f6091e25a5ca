//! Skillvault Server Binary
//!
//! Starts the HTTP API over an in-memory node store.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin skillvault-server
//! ```
//!
//! # Environment Variables
//!
//! - `SKILLVAULT_PORT`: Server port (default: 3001)
//! - `RUST_LOG`: Logging level (e.g., "info", "debug", "trace")

use std::env;
use std::sync::Arc;

use skillvault_core::services::NodeService;
use skillvault_core::store::MemoryStore;
use skillvault_server::start_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let port = env::var("SKILLVAULT_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3001);

    let node_service = Arc::new(NodeService::new(Arc::new(MemoryStore::new())));

    start_server(node_service, port).await
}
