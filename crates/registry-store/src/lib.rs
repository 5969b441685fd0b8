//! Storage layer for the People Registry service.
//!
//! The request handlers only see the [`PersonStore`] capability. This crate
//! defines that trait and ships one implementation, [`MemoryStore`], which
//! keeps every record in process memory for the lifetime of the server.
//!
//! # Modules
//!
//! - [`store`] -- The storage capability trait
//! - [`memory`] -- Lock-guarded in-memory implementation
//! - [`error`] -- Shared error types

pub mod error;
pub mod memory;
pub mod store;

// Re-export primary types for convenience.
pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::PersonStore;
