//! Filter parameters and the order predicate built from them

use crate::core::error::ParseError;
use crate::core::field::{end_of_local_day, parse_instant, start_of_local_day};
use crate::core::order::{Order, OrderStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status tab selection: every order, or a single status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    /// Tabs in display order with their labels
    pub const TABS: [(StatusFilter, &'static str); 4] = [
        (StatusFilter::All, "All orders"),
        (StatusFilter::Only(OrderStatus::Dispatch), "Dispatch"),
        (StatusFilter::Only(OrderStatus::Pending), "Pending"),
        (StatusFilter::Only(OrderStatus::Completed), "Completed"),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<OrderStatus>().map(StatusFilter::Only)
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Filter state of the table
///
/// `start_date`/`end_date` only constrain the view when both are set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterParams {
    pub status: StatusFilter,
    pub search: String,
    pub start_date: String,
    pub end_date: String,
}

impl FilterParams {
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_date_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = start.into();
        self.end_date = end.into();
        self
    }

    /// Whether both date bounds are present
    pub fn has_date_range(&self) -> bool {
        !self.start_date.is_empty() && !self.end_date.is_empty()
    }

    /// Whether these parameters let every record through
    pub fn is_unconstrained(&self) -> bool {
        self.search.trim().is_empty() && self.status == StatusFilter::All && !self.has_date_range()
    }
}

/// Inclusive date window in epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateWindow {
    Inactive,
    /// A bound could not be parsed; nothing falls inside
    Unsatisfiable,
    Between { start: i64, end: i64 },
}

/// Predicate over orders built from [`FilterParams`]
///
/// Constraints are checked search first, then status, then date, and
/// evaluation stops at the first one that rejects the order.
#[derive(Debug, Clone)]
pub struct OrderPredicate {
    search: Option<String>,
    status: StatusFilter,
    window: DateWindow,
}

impl OrderPredicate {
    pub fn build(params: &FilterParams) -> Self {
        let search = params.search.trim().to_lowercase();
        let search = (!search.is_empty()).then_some(search);

        let window = if params.has_date_range() {
            match (
                start_of_local_day(&params.start_date),
                end_of_local_day(&params.end_date),
            ) {
                (Some(start), Some(end)) => DateWindow::Between { start, end },
                _ => {
                    tracing::warn!(
                        start = %params.start_date,
                        end = %params.end_date,
                        "Unparseable date range bound, range matches no orders"
                    );
                    DateWindow::Unsatisfiable
                }
            }
        } else {
            DateWindow::Inactive
        };

        Self {
            search,
            status: params.status,
            window,
        }
    }

    pub fn matches(&self, order: &Order) -> bool {
        self.matches_search(order) && self.status.matches(order.status) && self.matches_date(order)
    }

    fn matches_search(&self, order: &Order) -> bool {
        let Some(needle) = &self.search else {
            return true;
        };
        order.name.to_lowercase().contains(needle.as_str())
            || order.id.to_lowercase().contains(needle.as_str())
    }

    fn matches_date(&self, order: &Order) -> bool {
        match self.window {
            DateWindow::Inactive => true,
            DateWindow::Unsatisfiable => false,
            DateWindow::Between { start, end } => {
                parse_instant(&order.date).is_some_and(|at| start <= at && at <= end)
            }
        }
    }
}
