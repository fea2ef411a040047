//! The order view engine: store, view state and derived rows in one place

use crate::config::{RemovalPagePolicy, ViewConfig};
use crate::core::events::{ViewEvent, ViewEventBus};
use crate::core::field::{SortKey, parse_instant, try_parse_price};
use crate::core::filter::{FilterParams, StatusFilter};
use crate::core::order::Order;
use crate::core::query::{PaginationMeta, clamp_page, page_count, paginate};
use crate::core::sort::{SortDirection, SortParams};
use crate::core::store::RecordStore;
use crate::storage::InMemoryOrderStore;
use crate::view::pipeline::DerivedView;
use crate::view::state::{ViewAction, ViewState, apply_filter_change};
use serde::Serialize;

/// Yes/no prompt shown before a destructive action
pub trait ConfirmationPrompt {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> ConfirmationPrompt for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Prompt that always gives the same answer
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl ConfirmationPrompt for AutoConfirm {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

/// Result of a removal request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed,
    /// The user answered no; the store is untouched
    Declined,
    /// Confirmed, but no order has this id
    NotFound,
}

/// One status tab as the display layer renders it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusTab {
    pub filter: StatusFilter,
    pub label: &'static str,
    pub active: bool,
}

/// Everything the display layer needs after a transition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    /// Rows on the current page
    pub rows: Vec<Order>,
    pub pagination: PaginationMeta,
    pub sort: SortParams,
    pub filter: FilterParams,
}

impl ViewSnapshot {
    pub fn visible(&self) -> &[Order] {
        &self.rows
    }

    pub fn page_index(&self) -> usize {
        self.pagination.page
    }

    pub fn page_count(&self) -> usize {
        self.pagination.total_pages
    }

    /// Matching orders across all pages
    pub fn result_count(&self) -> usize {
        self.pagination.total
    }

    /// Text for the result counter, e.g. "12 orders found"
    pub fn result_label(&self) -> String {
        format!("{} orders found", self.result_count())
    }

    /// Header arrow for a column, `None` when it is not the sort column
    pub fn sort_indicator(&self, key: SortKey) -> Option<SortDirection> {
        self.sort.indicator(key)
    }

    pub fn status_tabs(&self) -> Vec<StatusTab> {
        StatusFilter::TABS
            .iter()
            .map(|&(filter, label)| StatusTab {
                filter,
                label,
                active: filter == self.filter.status,
            })
            .collect()
    }
}

/// In-memory order table view
///
/// Owns the record store and the view state. Every action runs the whole
/// filter → sort → paginate chain to completion before returning the
/// resulting [`ViewSnapshot`].
///
/// # Example
/// ```rust,ignore
/// let store = SeedData::from_file("orders.json")?.into_store()?;
/// let mut view = OrderView::new(store, ViewConfig::default());
///
/// let snapshot = view.dispatch(ViewAction::StatusSelected {
///     status: StatusFilter::Only(OrderStatus::Pending),
/// });
/// println!("{}", snapshot.result_label());
/// ```
#[derive(Debug)]
pub struct OrderView<S: RecordStore<Order> = InMemoryOrderStore> {
    store: S,
    config: ViewConfig,
    state: ViewState,
    derived: DerivedView,
    events: Option<ViewEventBus>,
}

impl<S: RecordStore<Order>> OrderView<S> {
    pub fn new(store: S, config: ViewConfig) -> Self {
        audit_records(&store);

        let state = ViewState::new(config.default_sort);
        let mut derived = DerivedView::new();
        derived.refresh(&store, &state.filter, &state.sort);

        Self {
            store,
            config,
            state,
            derived,
            events: None,
        }
    }

    /// Publish view events on `bus`
    pub fn with_event_bus(mut self, bus: ViewEventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// How many times the filter/sort derivation has run
    pub fn recomputations(&self) -> u64 {
        self.derived.recomputations()
    }

    /// Matching orders before pagination
    pub fn result_count(&self) -> usize {
        self.derived.len()
    }

    pub fn page_count(&self) -> usize {
        page_count(self.derived.len(), self.config.page_size)
    }

    /// Apply one user action
    pub fn dispatch(&mut self, action: ViewAction) -> ViewSnapshot {
        tracing::debug!(?action, page = self.state.page, "Dispatching view action");
        let next = self.state.apply(&action, self.page_count());
        self.transition(next)
    }

    /// Replace the whole filter at once (page goes back to 1)
    pub fn set_filter(&mut self, filter: FilterParams) -> ViewSnapshot {
        let next = apply_filter_change(&self.state, filter);
        self.transition(next)
    }

    /// Ask for confirmation, then remove the order
    pub fn request_removal(
        &mut self,
        id: &str,
        prompt: &impl ConfirmationPrompt,
    ) -> RemovalOutcome {
        let message = format!("Are you sure you want to delete order {}?", id);
        if !prompt.confirm(&message) {
            tracing::debug!(id, "Removal declined");
            self.publish(ViewEvent::RemovalDeclined { id: id.to_string() });
            return RemovalOutcome::Declined;
        }

        if self.remove_by_id(id) {
            RemovalOutcome::Removed
        } else {
            RemovalOutcome::NotFound
        }
    }

    /// Remove an order without prompting. Returns whether one was removed.
    ///
    /// The store is updated before the view is recomputed. With
    /// [`RemovalPagePolicy::Clamp`] a page left empty by the removal is
    /// replaced by the last page that still has rows.
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        if self.store.remove_by_id(id).is_none() {
            return false;
        }
        self.publish(ViewEvent::OrderRemoved { id: id.to_string() });

        self.derived
            .refresh(&self.store, &self.state.filter, &self.state.sort);

        if self.config.removal_page_policy == RemovalPagePolicy::Clamp {
            let clamped = clamp_page(self.state.page, self.page_count());
            if clamped != self.state.page {
                tracing::debug!(from = self.state.page, to = clamped, "Clamped page after removal");
                self.state.page = clamped;
            }
        }

        self.publish_state();
        true
    }

    /// Current rows and page metadata
    pub fn snapshot(&self) -> ViewSnapshot {
        let page = paginate(self.derived.ids(), self.state.page, self.config.page_size);
        let rows = page
            .items
            .iter()
            .filter_map(|id| self.store.get(id))
            .cloned()
            .collect();

        ViewSnapshot {
            rows,
            pagination: page.pagination,
            sort: self.state.sort,
            filter: self.state.filter.clone(),
        }
    }

    fn transition(&mut self, next: ViewState) -> ViewSnapshot {
        self.state = next;
        self.derived
            .refresh(&self.store, &self.state.filter, &self.state.sort);
        self.publish_state();
        self.snapshot()
    }

    fn publish_state(&self) {
        self.publish(ViewEvent::StateChanged {
            page: self.state.page,
            page_count: self.page_count(),
            result_count: self.derived.len(),
            sort: self.state.sort,
            filter: self.state.filter.clone(),
        });
    }

    fn publish(&self, event: ViewEvent) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }
}

/// Warn about orders whose date or price cannot be interpreted
fn audit_records<S: RecordStore<Order>>(store: &S) {
    for order in store.records() {
        if parse_instant(&order.date).is_none() {
            tracing::warn!(
                id = %order.id,
                date = %order.date,
                "Order date is not parseable; it sorts before every dated order and never matches a date range"
            );
        }
        if try_parse_price(&order.price).is_none() {
            tracing::warn!(
                id = %order.id,
                price = %order.price,
                "Order price has no numeric part; it sorts as 0"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::order::OrderStatus;
    use std::cell::RefCell;

    fn orders(count: usize) -> Vec<Order> {
        (1..=count)
            .map(|i| {
                Order::new(
                    format!("ORD-{:02}", i),
                    format!("Customer {}", i),
                    "addr",
                    format!("2024-01-{:02}", i),
                    format!("${}", i * 10),
                    OrderStatus::Pending,
                )
            })
            .collect()
    }

    fn view(count: usize, config: ViewConfig) -> OrderView {
        OrderView::new(InMemoryOrderStore::from_records(orders(count)).unwrap(), config)
    }

    #[test]
    fn test_initial_snapshot() {
        let view = view(12, ViewConfig::default());
        let snapshot = view.snapshot();
        assert_eq!(snapshot.page_index(), 1);
        assert_eq!(snapshot.page_count(), 2);
        assert_eq!(snapshot.result_count(), 12);
        assert_eq!(snapshot.visible().len(), 10);
        // newest first
        assert_eq!(snapshot.visible()[0].id, "ORD-12");
        assert_eq!(snapshot.result_label(), "12 orders found");
    }

    #[test]
    fn test_request_removal_declined_leaves_store() {
        let mut view = view(3, ViewConfig::default());
        let asked = RefCell::new(String::new());
        let prompt = |message: &str| {
            *asked.borrow_mut() = message.to_string();
            false
        };

        let outcome = view.request_removal("ORD-02", &prompt);
        assert_eq!(outcome, RemovalOutcome::Declined);
        assert_eq!(view.store().len(), 3);
        assert_eq!(*asked.borrow(), "Are you sure you want to delete order ORD-02?");
    }

    #[test]
    fn test_request_removal_confirmed() {
        let mut view = view(3, ViewConfig::default());
        assert_eq!(
            view.request_removal("ORD-02", &AutoConfirm(true)),
            RemovalOutcome::Removed
        );
        assert_eq!(view.result_count(), 2);
        assert_eq!(
            view.request_removal("ORD-02", &AutoConfirm(true)),
            RemovalOutcome::NotFound
        );
        assert_eq!(view.result_count(), 2);
    }

    #[test]
    fn test_page_actions_do_not_recompute() {
        let mut view = view(25, ViewConfig::default());
        let before = view.recomputations();
        view.dispatch(ViewAction::NextClicked);
        view.dispatch(ViewAction::PageClicked { page: 3 });
        assert_eq!(view.recomputations(), before);
        assert_eq!(view.state().page, 3);
    }

    #[test]
    fn test_status_tabs_mark_active() {
        let mut view = view(3, ViewConfig::default());
        let snapshot = view.dispatch(ViewAction::StatusSelected {
            status: StatusFilter::Only(OrderStatus::Pending),
        });
        let tabs = snapshot.status_tabs();
        assert_eq!(tabs.len(), 4);
        assert_eq!(tabs[0].label, "All orders");
        let active: Vec<&str> = tabs.iter().filter(|t| t.active).map(|t| t.label).collect();
        assert_eq!(active, vec!["Pending"]);
    }

    #[test]
    fn test_sort_indicator() {
        let mut view = view(3, ViewConfig::default());
        let snapshot = view.dispatch(ViewAction::ColumnHeaderClicked { key: SortKey::Name });
        assert_eq!(snapshot.sort_indicator(SortKey::Name), Some(SortDirection::Asc));
        assert_eq!(snapshot.sort_indicator(SortKey::Date), None);
    }

    #[test]
    fn test_configured_default_sort_and_page_size() {
        let config = ViewConfig::default()
            .with_page_size(5)
            .with_default_sort(SortParams::new(SortKey::Price, SortDirection::Asc));
        let view = view(12, config);
        let snapshot = view.snapshot();
        assert_eq!(snapshot.page_count(), 3);
        assert_eq!(snapshot.visible().len(), 5);
        assert_eq!(snapshot.visible()[0].id, "ORD-01");
    }
}
