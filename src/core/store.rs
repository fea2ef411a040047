//! Store trait backing the order view

use crate::core::entity::Record;

/// Authoritative collection of records that the view derives from
///
/// The only mutation is removal by id. Every effective mutation bumps
/// [`RecordStore::revision`], which lets derived views know when a cached
/// result is stale.
pub trait RecordStore<T: Record> {
    /// Iterate records in store order (seed order minus removals)
    fn records(&self) -> impl Iterator<Item = &T>;

    /// Look up one record
    fn get(&self, id: &str) -> Option<&T>;

    /// Remove the record with this id, if any. Unknown ids are a no-op.
    fn remove_by_id(&mut self, id: &str) -> Option<T>;

    /// Monotonic counter of effective mutations
    fn revision(&self) -> u64;

    /// Number of records held
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}
