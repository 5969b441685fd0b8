//! Request pipeline and HTTP server for the People Registry service.
//!
//! This crate turns an incoming `(method, path, headers, body)` tuple into
//! exactly one [`ApiResponse`]:
//!
//! - **Routing** -- the first path segment selects the resource; only
//!   `/person` exists, anything else is a 404
//! - **Dispatch** -- the HTTP method selects a [`PersonHandler`] operation
//!   through the closed [`Verb`] enum; other methods are a 405
//! - **Validation** -- each operation runs its [`RequestValidator`] checks
//!   in a fixed order and stops at the first failure
//! - **Storage** -- only after every check passed does the handler call
//!   the [`PersonStore`](registry_store::PersonStore)
//! - **Fault boundary** -- anything unexpected ([`ApiError`] or a panic)
//!   becomes a 500 and the server keeps running
//!
//! # Architecture
//!
//! ```text
//! Axum fallback --> resource prefix --> dispatch(Verb) --> PersonHandler
//!                                                             |
//!                                      RequestValidator <-----+----> PersonStore
//! ```

pub mod dispatch;
pub mod error;
pub mod handler;
pub mod response;
pub mod router;
pub mod server;
pub mod state;
pub mod validator;

// Re-export primary types for convenience.
pub use dispatch::{dispatch, Verb};
pub use error::ApiError;
pub use handler::PersonHandler;
pub use response::ApiResponse;
pub use router::build_router;
pub use server::{start_server, RunningServer, ServerConfig, ServerError};
pub use state::AppState;
pub use validator::{Rejection, RequestValidator};
