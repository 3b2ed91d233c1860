//! HTTP relay that forwards proxied calls and history writes to the backend.

pub mod config;
pub mod error;
pub mod handlers;

pub use config::RelayConfig;
pub use error::RelayError;
pub use handlers::RelayState;

use axum::{
    routing::{get, post},
    Router,
};
use handlers::{health_handler, history_handler, proxy_handler};
use std::future::Future;
use std::io;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(state: RelayState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/proxy/*path",
            get(proxy_handler)
                .post(proxy_handler)
                .put(proxy_handler)
                .delete(proxy_handler)
                .patch(proxy_handler),
        )
        .route("/api/history", post(history_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Binds `config.host:config.port` and serves until `shutdown` resolves.
pub async fn serve<F>(config: &RelayConfig, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config
        .socket_addr()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let listener = TcpListener::bind(addr).await?;
    serve_listener(listener, config, shutdown).await
}

pub async fn serve_listener<F>(listener: TcpListener, config: &RelayConfig, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = listener.local_addr()?;
    info!(%address, backend = config.backend_url(), "relay listening");

    axum::serve(listener, router(RelayState::new(config.backend_url())))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("relay shutdown complete");
    Ok(())
}
