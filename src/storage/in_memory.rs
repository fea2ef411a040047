//! In-memory record store

use crate::core::entity::Record;
use crate::core::error::StoreError;
use crate::core::order::Order;
use crate::core::store::RecordStore;
use indexmap::IndexMap;

/// In-memory store keeping records in seed order
///
/// Removal shifts later records down so the relative order of the survivors
/// is preserved; that order is what ties fall back to when sorting.
#[derive(Debug, Clone)]
pub struct InMemoryStore<T: Record> {
    records: IndexMap<String, T>,
    revision: u64,
}

/// Store of order rows
pub type InMemoryOrderStore = InMemoryStore<Order>;

impl<T: Record> InMemoryStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: IndexMap::new(),
            revision: 0,
        }
    }

    /// Seed a store, rejecting duplicate ids
    pub fn from_records(records: impl IntoIterator<Item = T>) -> Result<Self, StoreError> {
        let mut map = IndexMap::new();
        for record in records {
            let id = record.id().to_string();
            if map.contains_key(&id) {
                return Err(StoreError::DuplicateId { id });
            }
            map.insert(id, record);
        }

        tracing::debug!(
            resource = T::resource_name(),
            count = map.len(),
            "Seeded in-memory store"
        );

        Ok(Self {
            records: map,
            revision: 0,
        })
    }
}

impl<T: Record> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> RecordStore<T> for InMemoryStore<T> {
    fn records(&self) -> impl Iterator<Item = &T> {
        self.records.values()
    }

    fn get(&self, id: &str) -> Option<&T> {
        self.records.get(id)
    }

    fn remove_by_id(&mut self, id: &str) -> Option<T> {
        let removed = self.records.shift_remove(id);
        if removed.is_some() {
            self.revision += 1;
            tracing::info!(resource = T::resource_name(), id, "Record removed");
        } else {
            tracing::debug!(resource = T::resource_name(), id, "Remove ignored, unknown id");
        }
        removed
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}
