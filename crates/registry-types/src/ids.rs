//! Type-safe identifier wrapper around [`Uuid`].
//!
//! Every person record is keyed by a [`PersonId`]. Identifiers are random
//! UUID v4 values generated by the store at creation time and rendered in
//! lowercase hyphenated form on the wire.

use serde::Serialize;
use uuid::Uuid;

/// Unique identifier for a person record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PersonId(pub Uuid);

impl PersonId {
    /// Generate a fresh random identifier (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its hyphenated text form.
    ///
    /// Only the canonical `8-4-4-4-12` layout is accepted; the simple,
    /// braced, and URN forms that [`Uuid::try_parse`] also understands are
    /// rejected so that a record has exactly one URL.
    pub fn parse_hyphenated(s: &str) -> Option<Self> {
        if s.len() != uuid::fmt::Hyphenated::LENGTH {
            return None;
        }
        Uuid::try_parse(s).ok().map(Self)
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl core::fmt::Display for PersonId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
