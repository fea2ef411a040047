//! View events broadcast to display-layer subscribers
//!
//! The engine publishes one event per state transition. Publishing is a
//! synchronous, non-blocking `send` on a `tokio::sync::broadcast` channel, so
//! no runtime is required on the publishing side.
//!
//! ```text
//! OrderView::dispatch() ──▶ ViewEventBus::publish() ──▶ broadcast channel ──▶ table widget
//!                                                                         ──▶ result counter
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let bus = ViewEventBus::new(64);
//! let mut rx = bus.subscribe();
//!
//! let mut view = OrderView::new(store, ViewConfig::default()).with_event_bus(bus.clone());
//! view.dispatch(ViewAction::SearchChanged { text: "ann".into() });
//!
//! if let Ok(envelope) = rx.recv().await {
//!     println!("{:?}", envelope.event);
//! }
//! ```

use crate::core::filter::FilterParams;
use crate::core::sort::SortParams;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;

/// Something observable happened to the view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewEvent {
    /// View parameters or the underlying records changed
    StateChanged {
        page: usize,
        page_count: usize,
        result_count: usize,
        sort: SortParams,
        filter: FilterParams,
    },
    /// An order was removed after confirmation
    OrderRemoved { id: String },
    /// The user declined to remove an order
    RemovalDeclined { id: String },
}

impl ViewEvent {
    pub fn event_kind(&self) -> &'static str {
        match self {
            ViewEvent::StateChanged { .. } => "state_changed",
            ViewEvent::OrderRemoved { .. } => "order_removed",
            ViewEvent::RemovalDeclined { .. } => "removal_declined",
        }
    }

    /// Order this event relates to (if applicable)
    pub fn order_id(&self) -> Option<&str> {
        match self {
            ViewEvent::OrderRemoved { id } | ViewEvent::RemovalDeclined { id } => Some(id),
            ViewEvent::StateChanged { .. } => None,
        }
    }
}

/// Envelope wrapping a view event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Position of the event on its bus, starting at 1
    pub sequence: u64,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: ViewEvent,
}

/// Broadcast-based event bus for view events
///
/// Cheap to clone; clones share the channel and the sequence counter.
#[derive(Debug, Clone)]
pub struct ViewEventBus {
    sender: broadcast::Sender<EventEnvelope>,
    sequence: Arc<AtomicU64>,
}

impl ViewEventBus {
    /// Create a new bus with the given channel capacity
    ///
    /// Slow receivers that fall more than `capacity` events behind get a
    /// `Lagged` error on their next `recv()`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Publish an event to all subscribers
    ///
    /// Never blocks and never fails. Returns the number of receivers that
    /// will see the event.
    pub fn publish(&self, event: ViewEvent) -> usize {
        let envelope = EventEnvelope {
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed) + 1,
            timestamp: Utc::now(),
            event,
        };
        // send() returns Err only if there are no receivers, which is fine
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    /// Get the current number of active subscribers
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ViewEventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
