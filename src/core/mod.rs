//! Core module containing the record model and the building blocks of the view

pub mod entity;
pub mod error;
pub mod events;
pub mod field;
pub mod filter;
pub mod order;
pub mod query;
pub mod sort;
pub mod store;

pub use entity::Record;
pub use error::{ConfigError, ParseError, StoreError, ViewError};
pub use events::{EventEnvelope, ViewEvent, ViewEventBus};
pub use field::{FieldValue, SortKey};
pub use filter::{FilterParams, OrderPredicate, StatusFilter};
pub use order::{Order, OrderStatus};
pub use query::{Page, PageNav, PaginationMeta, paginate};
pub use sort::{SortDirection, SortParams, build_comparator};
pub use store::RecordStore;
