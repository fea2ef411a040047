//! Order record model

use crate::core::entity::Record;
use crate::core::error::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[serde(alias = "Pending", alias = "PENDING")]
    Pending,
    #[serde(alias = "Dispatch", alias = "DISPATCH")]
    Dispatch,
    #[serde(alias = "Completed", alias = "COMPLETED")]
    Completed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Dispatch,
        OrderStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Dispatch => "dispatch",
            OrderStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseError;

    /// Case-insensitive match against the status names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.trim().to_lowercase();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == folded)
            .ok_or_else(|| ParseError::UnknownStatus {
                value: s.to_string(),
            })
    }
}

/// One order row of the table
///
/// `date` and `price` are kept exactly as supplied; they are only interpreted
/// when filtering by date range or sorting by those columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub name: String,
    pub address: String,
    /// Calendar date, e.g. `2024-03-15`
    pub date: String,
    /// Currency amount with a symbol prefix, e.g. `$1,000.00`
    pub price: String,
    pub status: OrderStatus,
    /// Image reference shown next to the customer name
    #[serde(default)]
    pub avatar: String,
}

impl Order {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        date: impl Into<String>,
        price: impl Into<String>,
        status: OrderStatus,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            date: date.into(),
            price: price.into(),
            status,
            avatar: String::new(),
        }
    }

    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = avatar.into();
        self
    }
}

impl Record for Order {
    fn resource_name() -> &'static str {
        "order"
    }

    fn id(&self) -> &str {
        &self.id
    }
}
