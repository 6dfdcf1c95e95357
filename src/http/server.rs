//! HTTP server startup logic.

use std::net::SocketAddr;

use axum::Router;
use axum_server::Handle;

use crate::config::AppConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid bind address: {0}")]
    Addr(String),

    #[error("Failed to bind server: {0}")]
    Bind(std::io::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Start the HTTP server from the given configuration.
///
/// Installs the SIGTERM/SIGINT shutdown handler and blocks until the server
/// has drained and stopped. A bind failure (port in use, permission denied)
/// surfaces as an error so the process can exit non-zero.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.http.host, config.http.port)
        .parse()
        .map_err(|e| ServerError::Addr(format!("{}:{} ({})", config.http.host, config.http.port, e)))?;

    let handle = Handle::new();
    shutdown::setup_shutdown_handler(handle.clone());

    serve(app, addr, handle).await
}

/// Serve the router on the given address until the handle shuts it down.
///
/// Split out from [`start_server`] so tests can drive the server with their
/// own handle instead of process signals.
pub async fn serve(app: Router, addr: SocketAddr, handle: Handle) -> Result<(), ServerError> {
    tracing::info!(%addr, "Starting HTTP server");

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|e| match e.kind() {
            // Binding fails before any request is served; everything else is
            // a mid-serve failure and must not be reported as a bind error
            std::io::ErrorKind::AddrInUse
            | std::io::ErrorKind::AddrNotAvailable
            | std::io::ErrorKind::PermissionDenied => ServerError::Bind(e),
            _ => ServerError::Server(e.to_string()),
        })?;

    tracing::info!("Server stopped");
    Ok(())
}
