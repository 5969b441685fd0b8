//! The storage capability consumed by the request handlers.

use registry_types::{PersonId, Record};

use crate::error::StoreError;

/// Create/read/update/delete/list over opaque person records.
///
/// Calls are synchronous. Implementations must be safe to share between
/// concurrently running requests and must make every operation on a single
/// id atomic with respect to the other operations on that id. `create`
/// must never hand out an id it issued before, even after that record
/// has been deleted.
pub trait PersonStore: Send + Sync {
    /// Insert `record` under a freshly generated id and return the id.
    fn create(&self, record: Record) -> Result<PersonId, StoreError>;

    /// Return the record stored under `id`, if any.
    fn read(&self, id: PersonId) -> Result<Option<Record>, StoreError>;

    /// Replace the record stored under `id`.
    ///
    /// Returns the stored value, or `None` without inserting anything when
    /// `id` is unknown.
    fn update(&self, id: PersonId, record: Record) -> Result<Option<Record>, StoreError>;

    /// Remove the record stored under `id`. Returns whether a record was
    /// removed.
    fn delete(&self, id: PersonId) -> Result<bool, StoreError>;

    /// Return every live record in a deterministic order.
    fn list(&self) -> Result<Vec<Record>, StoreError>;
}
