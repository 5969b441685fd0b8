//! Error types for the server binary.
//!
//! [`AppError`] is the top-level error that wraps every failure mode during
//! startup, serving, and shutdown.

use registry_api::ServerError;

use crate::config::ConfigError;

/// Top-level error for the People Registry binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The HTTP server failed to start or stop.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: ServerError,
    },

    /// Waiting for the shutdown signal failed.
    #[error("signal error: {source}")]
    Signal {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
