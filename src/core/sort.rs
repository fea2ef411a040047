//! Sort parameters and comparator construction

use crate::core::error::ParseError;
use crate::core::field::SortKey;
use crate::core::order::Order;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort direction of the active column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Apply this direction to an ascending ordering. Ties stay ties.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(ParseError::UnknownDirection {
                value: s.to_string(),
            }),
        }
    }
}

/// Active sort column and direction
///
/// Defaults to newest orders first (`date:desc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortParams {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortParams {
    fn default() -> Self {
        Self {
            key: SortKey::Date,
            direction: SortDirection::Desc,
        }
    }
}

impl SortParams {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Sort state after a click on the header of `key`.
    ///
    /// Clicking the active column flips its direction; clicking another
    /// column selects it in ascending order.
    pub fn clicked(self, key: SortKey) -> Self {
        if self.key == key {
            Self::new(key, self.direction.toggled())
        } else {
            Self::new(key, SortDirection::Asc)
        }
    }

    /// Direction indicator for a column header, `None` if the column is inactive
    pub fn indicator(&self, key: SortKey) -> Option<SortDirection> {
        (self.key == key).then_some(self.direction)
    }

    /// Build the comparator for these parameters
    pub fn comparator(self) -> impl Fn(&Order, &Order) -> Ordering + Copy {
        build_comparator(self.key, self.direction)
    }
}

impl fmt::Display for SortParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.direction)
    }
}

impl FromStr for SortParams {
    type Err = ParseError;

    /// Parse `field`, `field:asc` or `field:desc`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((key, direction)) => Ok(Self::new(key.parse()?, direction.parse()?)),
            None => Ok(Self::new(s.parse()?, SortDirection::Asc)),
        }
    }
}

/// Comparator over orders for one column and direction.
///
/// The result is a total preorder for every input, including unparseable
/// prices and dates, so it is safe to hand to a stable sort.
pub fn build_comparator(
    key: SortKey,
    direction: SortDirection,
) -> impl Fn(&Order, &Order) -> Ordering + Copy {
    move |a: &Order, b: &Order| direction.apply(key.value(a).compare(&key.value(b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::order::OrderStatus;

    fn priced(id: &str, price: &str) -> Order {
        Order::new(id, id, "addr", "2024-01-01", price, OrderStatus::Pending)
    }

    fn dated(id: &str, date: &str) -> Order {
        Order::new(id, id, "addr", date, "$1", OrderStatus::Pending)
    }

    fn ids(orders: &[Order]) -> Vec<&str> {
        orders.iter().map(|o| o.id.as_str()).collect()
    }

    #[test]
    fn test_default_sort_is_date_desc() {
        let sort = SortParams::default();
        assert_eq!(sort.key, SortKey::Date);
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(sort.to_string(), "date:desc");
    }

    #[test]
    fn test_header_click_toggles_or_switches() {
        let sort = SortParams::default();

        let same = sort.clicked(SortKey::Date);
        assert_eq!(same, SortParams::new(SortKey::Date, SortDirection::Asc));
        assert_eq!(
            same.clicked(SortKey::Date),
            SortParams::new(SortKey::Date, SortDirection::Desc)
        );

        let other = sort.clicked(SortKey::Price);
        assert_eq!(other, SortParams::new(SortKey::Price, SortDirection::Asc));
    }

    #[test]
    fn test_indicator() {
        let sort = SortParams::new(SortKey::Name, SortDirection::Desc);
        assert_eq!(sort.indicator(SortKey::Name), Some(SortDirection::Desc));
        assert_eq!(sort.indicator(SortKey::Price), None);
    }

    #[test]
    fn test_sort_params_from_str() {
        assert_eq!(
            "price:desc".parse::<SortParams>(),
            Ok(SortParams::new(SortKey::Price, SortDirection::Desc))
        );
        assert_eq!(
            "name".parse::<SortParams>(),
            Ok(SortParams::new(SortKey::Name, SortDirection::Asc))
        );
        assert!("name:sideways".parse::<SortParams>().is_err());
        assert!("colour:asc".parse::<SortParams>().is_err());
    }

    #[test]
    fn test_price_sorts_numerically() {
        let mut orders = vec![
            priced("a", "$120.50"),
            priced("b", "$45"),
            priced("c", "$1,000.00"),
        ];
        orders.sort_by(build_comparator(SortKey::Price, SortDirection::Asc));
        assert_eq!(ids(&orders), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_date_desc() {
        let mut orders = vec![
            dated("jan", "2024-01-01"),
            dated("mar", "2024-03-15"),
            dated("feb", "2024-02-10"),
        ];
        orders.sort_by(SortParams::default().comparator());
        assert_eq!(ids(&orders), vec!["mar", "feb", "jan"]);
    }

    #[test]
    fn test_ties_keep_relative_order_in_both_directions() {
        let orders = vec![
            priced("x", "$10"),
            priced("y", "$5"),
            priced("z", "$10.00"),
        ];

        let mut asc = orders.clone();
        asc.sort_by(build_comparator(SortKey::Price, SortDirection::Asc));
        assert_eq!(ids(&asc), vec!["y", "x", "z"]);

        let mut desc = orders;
        desc.sort_by(build_comparator(SortKey::Price, SortDirection::Desc));
        assert_eq!(ids(&desc), vec!["x", "z", "y"]);
    }

    #[test]
    fn test_tie_is_equal_regardless_of_direction() {
        let a = priced("a", "$3");
        let b = priced("b", "$3.0");
        assert_eq!(
            build_comparator(SortKey::Price, SortDirection::Desc)(&a, &b),
            Ordering::Equal
        );
    }

    #[test]
    fn test_malformed_values_sort_consistently() {
        let mut orders = vec![
            priced("p2", "$2"),
            priced("bad", "call us"),
            priced("m1", "-$1"),
        ];
        orders.sort_by(build_comparator(SortKey::Price, SortDirection::Asc));
        assert_eq!(ids(&orders), vec!["m1", "bad", "p2"]);

        let mut orders = vec![
            dated("ok", "2024-01-01"),
            dated("bad", "someday"),
            dated("older", "2023-01-01"),
        ];
        orders.sort_by(build_comparator(SortKey::Date, SortDirection::Desc));
        assert_eq!(ids(&orders), vec!["ok", "older", "bad"]);
    }

    #[test]
    fn test_text_columns_compare_ordinally() {
        let mut orders = vec![
            Order::new("1", "bob", "a", "2024-01-01", "$1", OrderStatus::Pending),
            Order::new("2", "Bob", "a", "2024-01-01", "$1", OrderStatus::Pending),
            Order::new("3", "alice", "a", "2024-01-01", "$1", OrderStatus::Pending),
        ];
        orders.sort_by(build_comparator(SortKey::Name, SortDirection::Asc));
        let names: Vec<&str> = orders.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "alice", "bob"]);
    }
}
