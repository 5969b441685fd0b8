//! Shared application state for the People Registry server.
//!
//! [`AppState`] is wrapped in an [`Arc`] and injected into the request
//! entry point through Axum's `State` extractor. It holds the person
//! handler (and through it the store) plus the request body limit.

use std::sync::Arc;

use registry_store::{MemoryStore, PersonStore};

use crate::handler::PersonHandler;

/// Default upper bound for a request body, in bytes (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Shared state for the Axum application.
#[derive(Clone)]
pub struct AppState {
    /// Handler for the `/person` resource.
    pub people: PersonHandler,
    /// Bodies longer than this are refused before validation.
    pub max_body_bytes: usize,
}

impl AppState {
    /// Create state serving records from `store`.
    pub fn new(store: Arc<dyn PersonStore>) -> Self {
        Self {
            people: PersonHandler::new(store),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Create state backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Override the request body limit.
    pub const fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}
