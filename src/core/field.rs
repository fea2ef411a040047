//! Sortable columns and typed field normalization
//!
//! Every column of the order table maps to a typed accessor through
//! [`SortKey`]. Two columns are normalized before comparison:
//!
//! - `price` strings like `"$1,000.00"` become a numeric magnitude
//! - `date` strings become milliseconds since the Unix epoch (local time)

use crate::core::error::ParseError;
use crate::core::order::Order;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Date-time layouts interpreted as local wall-clock time
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Calendar-date layouts, interpreted as local midnight
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// A column of the order table that can drive sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Id,
    Name,
    Address,
    Date,
    Price,
    Status,
    Avatar,
}

impl SortKey {
    /// Columns in table order
    pub const ALL: [SortKey; 7] = [
        SortKey::Id,
        SortKey::Name,
        SortKey::Address,
        SortKey::Date,
        SortKey::Price,
        SortKey::Status,
        SortKey::Avatar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::Address => "address",
            SortKey::Date => "date",
            SortKey::Price => "price",
            SortKey::Status => "status",
            SortKey::Avatar => "avatar",
        }
    }

    /// Read this column from an order as a comparable value
    pub fn value<'a>(&self, order: &'a Order) -> FieldValue<'a> {
        match self {
            SortKey::Id => FieldValue::Text(&order.id),
            SortKey::Name => FieldValue::Text(&order.name),
            SortKey::Address => FieldValue::Text(&order.address),
            SortKey::Status => FieldValue::Text(order.status.as_str()),
            SortKey::Avatar => FieldValue::Text(&order.avatar),
            SortKey::Price => FieldValue::Amount(parse_price(&order.price)),
            SortKey::Date => FieldValue::Instant(parse_instant(&order.date)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.trim().to_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == folded)
            .ok_or_else(|| ParseError::UnknownSortKey { key: s.to_string() })
    }
}

/// A normalized column value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Compared ordinally, byte by byte
    Text(&'a str),
    /// Parsed currency magnitude
    Amount(f64),
    /// Milliseconds since epoch; `None` when the date could not be parsed
    Instant(Option<i64>),
}

impl FieldValue<'_> {
    /// Total ordering between two values of the same column.
    ///
    /// Unparseable instants are equal to each other and precede every valid
    /// instant. Values from different columns never occur together and
    /// compare equal.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Amount(a), FieldValue::Amount(b)) => a.total_cmp(b),
            (FieldValue::Instant(a), FieldValue::Instant(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Parse a currency string into its magnitude.
///
/// Every character other than digits, `-` and `.` is dropped, then the
/// leading decimal number is read. Strings without any numeric part yield
/// `0.0`.
pub fn parse_price(raw: &str) -> f64 {
    try_parse_price(raw).unwrap_or(0.0)
}

/// Like [`parse_price`] but reports a missing numeric part as `None`
pub fn try_parse_price(raw: &str) -> Option<f64> {
    static NOISE: OnceLock<Regex> = OnceLock::new();
    static LEADING_NUMBER: OnceLock<Regex> = OnceLock::new();

    let noise = NOISE.get_or_init(|| Regex::new(r"[^0-9.\-]+").unwrap());
    let leading =
        LEADING_NUMBER.get_or_init(|| Regex::new(r"^-?(?:\d+(?:\.\d*)?|\.\d+)").unwrap());

    let stripped = noise.replace_all(raw, "");
    let number = leading.find(&stripped)?;
    // -0.0 + 0.0 == 0.0, keeps negative zero from sorting before zero
    number.as_str().parse::<f64>().ok().map(|value| value + 0.0)
}

/// Parse a date string into milliseconds since the Unix epoch.
///
/// RFC 3339 strings carry their own offset. Every other accepted layout is
/// read as local time; plain calendar dates mean local midnight.
pub fn parse_instant(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    parse_wall_clock(raw).and_then(local_millis)
}

/// Calendar day (local time) a date string falls on
pub fn parse_local_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    parse_wall_clock(raw).map(|naive| naive.date())
}

/// First instant (00:00:00.000 local) of the day named by `raw`
pub fn start_of_local_day(raw: &str) -> Option<i64> {
    let day = parse_local_date(raw)?;
    local_millis(day.and_hms_milli_opt(0, 0, 0, 0)?)
}

/// Last instant (23:59:59.999 local) of the day named by `raw`
pub fn end_of_local_day(raw: &str) -> Option<i64> {
    let day = parse_local_date(raw)?;
    local_millis(day.and_hms_milli_opt(23, 59, 59, 999)?)
}

fn parse_wall_clock(raw: &str) -> Option<NaiveDateTime> {
    if raw.is_empty() {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn local_millis(naive: NaiveDateTime) -> Option<i64> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
}
