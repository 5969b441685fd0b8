//! Process-local [`PersonStore`] backed by an ordered map.

use std::collections::{BTreeMap, HashSet};
use std::sync::{PoisonError, RwLock};

use registry_types::{PersonId, Record};
use tracing::debug;

use crate::error::StoreError;
use crate::store::PersonStore;

/// In-memory person store.
///
/// Records live in a [`BTreeMap`] keyed by id, so [`PersonStore::list`]
/// returns them in ascending id order. Every id ever issued is remembered
/// so that a deleted id is never handed out again. That set only grows:
/// each record created costs one id of memory for the life of the store,
/// even after the record is deleted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: BTreeMap<PersonId, Record>,
    issued: HashSet<PersonId>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersonStore for MemoryStore {
    fn create(&self, record: Record) -> Result<PersonId, StoreError> {
        let mut inner = self.inner.write().map_err(poisoned("create"))?;
        let id = loop {
            let candidate = PersonId::generate();
            if inner.issued.insert(candidate) {
                break candidate;
            }
        };
        inner.records.insert(id, record);
        debug!(%id, "person record created");
        Ok(id)
    }

    fn read(&self, id: PersonId) -> Result<Option<Record>, StoreError> {
        let inner = self.inner.read().map_err(poisoned("read"))?;
        Ok(inner.records.get(&id).cloned())
    }

    fn update(&self, id: PersonId, record: Record) -> Result<Option<Record>, StoreError> {
        let mut inner = self.inner.write().map_err(poisoned("update"))?;
        let Some(slot) = inner.records.get_mut(&id) else {
            return Ok(None);
        };
        *slot = record;
        debug!(%id, "person record updated");
        Ok(Some(slot.clone()))
    }

    fn delete(&self, id: PersonId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().map_err(poisoned("delete"))?;
        let removed = inner.records.remove(&id).is_some();
        if removed {
            debug!(%id, "person record deleted");
        }
        Ok(removed)
    }

    fn list(&self) -> Result<Vec<Record>, StoreError> {
        let inner = self.inner.read().map_err(poisoned("list"))?;
        Ok(inner.records.values().cloned().collect())
    }
}

fn poisoned<T>(operation: &'static str) -> impl FnOnce(PoisonError<T>) -> StoreError {
    move |_poison| StoreError::Poisoned(operation)
}
