//! Error types for the storage layer.
//!
//! Every store operation reports failures through [`StoreError`]. A missing
//! record is not an error: lookups return `None` and deletes return `false`.

/// Errors that can occur in a person store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A thread panicked while holding the store lock.
    #[error("store lock poisoned during {0}")]
    Poisoned(&'static str),
}
