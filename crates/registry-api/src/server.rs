//! People Registry HTTP server lifecycle management.
//!
//! [`start_server`] binds the listener and spawns the Axum serve loop on a
//! background Tokio task, returning a [`RunningServer`] handle. Calling
//! [`RunningServer::stop`] (or dropping the handle) triggers a graceful
//! shutdown: in-flight requests finish, then the listener closes.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::router::build_router;
use crate::state::AppState;

/// Default port when nothing else is configured.
pub const DEFAULT_PORT: u16 = 3000;

/// Configuration for the HTTP listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// The TCP port to listen on. `0` picks an ephemeral port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: DEFAULT_PORT,
        }
    }
}

/// Handle to a server started with [`start_server`].
#[derive(Debug)]
pub struct RunningServer {
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    /// The address the listener is bound to.
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Shut the server down gracefully and wait for the serve loop to end.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Serve`] if the serve loop failed or panicked.
    pub async fn stop(self) -> Result<(), ServerError> {
        if self.shutdown.send(()).is_err() {
            debug!("serve loop already finished before shutdown signal");
        }

        self.task
            .await
            .map_err(|e| ServerError::Serve(format!("serve task failed: {e}")))?
            .map_err(|e| ServerError::Serve(format!("serve error: {e}")))?;

        info!(addr = %self.local_addr, "Server closed");
        Ok(())
    }
}

/// Start the People Registry HTTP server.
///
/// Binds to the configured address, builds the router, and serves requests
/// on a background task until [`RunningServer::stop`] is called or the
/// handle is dropped.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the address cannot be resolved or the
/// TCP listener cannot bind.
pub async fn start_server(
    config: &ServerConfig,
    state: Arc<AppState>,
) -> Result<RunningServer, ServerError> {
    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|e| {
            ServerError::Bind(format!("bind failed on {}:{}: {e}", config.host, config.port))
        })?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| ServerError::Bind(format!("no local address: {e}")))?;

    let router = build_router(state);
    let (shutdown, signal) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                // A dropped sender also means "stop".
                signal.await.ok();
            })
            .await
    });

    info!(addr = %local_addr, "Server listening");

    Ok(RunningServer {
        local_addr,
        shutdown,
        task,
    })
}

/// Errors that can occur when starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}
