//! # Order View
//!
//! An in-memory order table: holds a collection of order records and hands a
//! display layer the filtered, searched, sorted and paginated slice of them,
//! keeping page, sort and filter state consistent across user actions.
//!
//! ## Features
//!
//! - **Deterministic derivation**: filter (search → status → date range), then
//!   a stable sort, then the page window
//! - **Typed columns**: each sortable column maps to a typed accessor; prices
//!   and dates are normalized before comparison
//! - **Atomic state transitions**: changing a filter resets the page index in
//!   the same step
//! - **Memoized**: the derivation reruns only when the records, the filter or
//!   the sort changed
//! - **Confirmed removal**: deleting an order goes through a yes/no prompt
//! - **Events**: optional broadcast of every transition to subscribers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use order_view::prelude::*;
//!
//! let store = SeedData::from_file("orders.json")?.into_store()?;
//! let mut view = OrderView::new(store, ViewConfig::default());
//!
//! view.dispatch(ViewAction::SearchChanged { text: "ann".into() });
//! let snapshot = view.dispatch(ViewAction::ColumnHeaderClicked { key: SortKey::Price });
//!
//! for order in snapshot.visible() {
//!     println!("{} {} {}", order.id, order.name, order.price);
//! }
//! println!("{}", snapshot.result_label());
//! ```

pub mod config;
pub mod core;
pub mod storage;
pub mod view;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        entity::Record,
        error::{ConfigError, ParseError, StoreError, ViewError},
        events::{EventEnvelope, ViewEvent, ViewEventBus},
        field::{FieldValue, SortKey},
        filter::{FilterParams, OrderPredicate, StatusFilter},
        order::{Order, OrderStatus},
        query::{Page, PageNav, PaginationMeta, paginate},
        sort::{SortDirection, SortParams, build_comparator},
        store::RecordStore,
    };

    // === View ===
    pub use crate::view::{
        AutoConfirm, ConfirmationPrompt, DerivedView, OrderView, RemovalOutcome, StatusTab,
        ViewAction, ViewSnapshot, ViewState, apply_filter_change, derive,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryOrderStore, InMemoryStore};

    // === Config ===
    pub use crate::config::{RemovalPagePolicy, SeedData, ViewConfig};
}
