//! Filter-then-sort derivation over the record store

use crate::core::filter::{FilterParams, OrderPredicate};
use crate::core::order::Order;
use crate::core::sort::SortParams;
use crate::core::store::RecordStore;

/// Ordered, filtered view of `records`.
///
/// Pure: the same records and parameters always give the same sequence.
/// Filtering happens before sorting and the sort is stable, so rows with
/// equal keys keep their store order.
pub fn derive<'a, I>(records: I, filter: &FilterParams, sort: &SortParams) -> Vec<&'a Order>
where
    I: IntoIterator<Item = &'a Order>,
{
    let predicate = OrderPredicate::build(filter);
    let compare = sort.comparator();

    let mut rows: Vec<&Order> = records
        .into_iter()
        .filter(|order| predicate.matches(order))
        .collect();
    rows.sort_by(|a, b| compare(*a, *b));
    rows
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DerivationKey {
    revision: u64,
    filter: FilterParams,
    sort: SortParams,
}

/// Memoized derivation keyed on store revision, filter and sort
///
/// Holds the ordered ids of the matching orders. Refreshing with unchanged
/// inputs is free; the cached ids are always what [`derive`] would return.
#[derive(Debug, Clone, Default)]
pub struct DerivedView {
    key: Option<DerivationKey>,
    ids: Vec<String>,
    recomputations: u64,
}

impl DerivedView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the cache up to date. Returns `true` if it was recomputed.
    pub fn refresh<S: RecordStore<Order>>(
        &mut self,
        store: &S,
        filter: &FilterParams,
        sort: &SortParams,
    ) -> bool {
        let key = DerivationKey {
            revision: store.revision(),
            filter: filter.clone(),
            sort: *sort,
        };
        if self.key.as_ref() == Some(&key) {
            return false;
        }

        self.ids = derive(store.records(), filter, sort)
            .into_iter()
            .map(|order| order.id.clone())
            .collect();
        self.key = Some(key);
        self.recomputations += 1;

        tracing::debug!(
            revision = store.revision(),
            sort = %sort,
            results = self.ids.len(),
            "Recomputed order view"
        );
        true
    }

    /// Ordered ids of the matching orders
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Resolve the cached ids against the store
    pub fn rows<'s, S: RecordStore<Order>>(&self, store: &'s S) -> Vec<&'s Order> {
        self.ids.iter().filter_map(|id| store.get(id)).collect()
    }

    /// Number of matching orders (before pagination)
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// How many times the derivation actually ran
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }
}
