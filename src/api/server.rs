//! HTTP server lifecycle.
//!
//! Pattern: bind → build router → serve with graceful shutdown. Each
//! request is handled independently; the only suspending operation per
//! request is the hosted-model call.

use std::net::SocketAddr;

use crate::api::router::app_router;
use crate::api::types::ApiContext;

/// Bind `addr` and serve the application until a ctrl-c arrives.
pub async fn serve(ctx: ApiContext, addr: SocketAddr) -> Result<(), String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind {addr}: {e}"))?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    let app = app_router(ctx);
    tracing::info!(addr = %local_addr, "formfill server listening");

    let shutdown_signal = async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {e}"))
}
