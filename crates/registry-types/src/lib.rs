//! Shared type definitions for the People Registry service.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for person identifiers
//! - [`record`] -- Opaque person records and field helpers

pub mod ids;
pub mod record;

// Re-export all public types at crate root for convenience.
pub use ids::PersonId;
pub use record::{Record, REQUIRED_FIELDS};
