//! HTTP surface of the grammar agent

pub mod error;
pub mod routes;

use axum::{routing::post, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{config::AgentConfig, service::CorrectionService};

pub use error::RpcFailure;
pub use routes::AppState;

/// Path of the single JSON-RPC endpoint
pub const GRAMMAR_CHECK_PATH: &str = "/a2a/grammar-check";

/// Build the application router around `service`
pub fn router(service: CorrectionService) -> Router {
    Router::new()
        .route(GRAMMAR_CHECK_PATH, post(routes::grammar_check))
        .with_state(AppState::new(service))
        .layer(TraceLayer::new_for_http())
}

/// Bind to the configured address and serve until Ctrl-C
pub async fn serve(config: &AgentConfig, service: CorrectionService) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(
        "listening on http://{}{}",
        listener.local_addr()?,
        GRAMMAR_CHECK_PATH
    );

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
