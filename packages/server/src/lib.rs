//! Skillvault HTTP API Server
//!
//! Exposes the node service as a JSON-over-HTTP REST API. The router
//! is built from modular endpoint groups; handlers validate request
//! payloads, call into `skillvault-core`, and map service errors to
//! HTTP statuses.

use std::sync::Arc;

use axum::Router;
use skillvault_core::services::NodeService;
use tower_http::trace::TraceLayer;

mod http_error;
mod node_endpoints;

// Re-export HttpError for use by endpoint modules
pub use http_error::HttpError;

/// Application state shared across all endpoints
#[derive(Clone)]
pub struct AppState {
    pub node_service: Arc<NodeService>,
}

/// Create the application router with all endpoint modules
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(node_endpoints::routes(state))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
///
/// # Arguments
///
/// * `node_service` - Node service instance
/// * `port` - Port to listen on
///
/// # Errors
///
/// Returns error if the server fails to bind or start.
pub async fn start_server(node_service: Arc<NodeService>, port: u16) -> anyhow::Result<()> {
    let state = AppState { node_service };
    let app = create_router(state);

    let addr = format!("127.0.0.1:{}", port);
    tracing::info!("skillvault server starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
