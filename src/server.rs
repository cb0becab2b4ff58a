//! HTTP server: routes and lifecycle

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{config::ServerConfig, errors::WhaleWatchError, handlers, state::AppState};

/// Build the application router.
///
/// - `GET /` -- map page
/// - `POST /report` -- sighting submission
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/report", post(handlers::report))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve requests until the task is dropped
pub async fn start_server(
    config: &ServerConfig,
    state: Arc<AppState>,
) -> Result<(), WhaleWatchError> {
    let addr = format!("{}:{}", config.host, config.port);
    let addr: SocketAddr = addr.parse().map_err(|e| WhaleWatchError::BindError {
        addr: addr.clone(),
        origin: format!("invalid address: {}", e),
    })?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| WhaleWatchError::BindError {
            addr: addr.to_string(),
            origin: e.to_string(),
        })?;

    info!(%addr, "Whale watch listening");

    axum::serve(listener, build_router(state)).await?;

    Ok(())
}
