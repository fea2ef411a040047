//! Configuration loading and management

use crate::core::error::{ConfigError, Result, StoreError};
use crate::core::order::Order;
use crate::core::query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::core::sort::SortParams;
use crate::storage::InMemoryOrderStore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// What happens to the page index when a removal empties the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPagePolicy {
    /// Move to the last page that still has rows (or page 1)
    #[default]
    Clamp,
    /// Keep the index as is; the view may show an empty page
    Preserve,
}

/// Configuration of the order table view
///
/// # Example
/// ```yaml
/// page_size: 10
/// default_sort:
///   key: date
///   direction: desc
/// removal_page_policy: clamp
/// event_capacity: 256
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ViewConfig {
    /// Rows per page
    #[validate(range(min = 1, max = 100))]
    pub page_size: usize,

    /// Sort applied before the user clicks any header
    pub default_sort: SortParams,

    /// Page index handling after a removal
    pub removal_page_policy: RemovalPagePolicy,

    /// Buffer size of the event bus created by [`ViewConfig::event_bus`]
    #[validate(range(min = 1))]
    pub event_capacity: usize,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            default_sort: SortParams::default(),
            removal_page_policy: RemovalPagePolicy::default(),
            event_capacity: 1024,
        }
    }
}

impl ViewConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_yaml_str(&read_file(path.as_ref())?)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn with_removal_page_policy(mut self, policy: RemovalPagePolicy) -> Self {
        self.removal_page_policy = policy;
        self
    }

    pub fn with_default_sort(mut self, sort: SortParams) -> Self {
        self.default_sort = sort;
        self
    }

    /// A fresh event bus sized from this configuration
    pub fn event_bus(&self) -> crate::core::events::ViewEventBus {
        crate::core::events::ViewEventBus::new(self.event_capacity)
    }
}

/// Orders the store is seeded with at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    pub orders: Vec<Order>,
}

impl SeedData {
    /// Load seed data, picking the format from the file extension
    /// (`.json` is JSON, anything else is YAML)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = read_file(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Build the record store, enforcing unique ids
    pub fn into_store(self) -> Result<InMemoryOrderStore, StoreError> {
        InMemoryOrderStore::from_records(self.orders)
    }

    /// Read a seed file and build the record store from it
    pub fn load_store(path: impl AsRef<Path>) -> Result<InMemoryOrderStore> {
        let store = Self::from_file(path)?.into_store()?;
        Ok(store)
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::SortKey;
    use crate::core::sort::SortDirection;

    #[test]
    fn test_default_config() {
        let config = ViewConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.default_sort, SortParams::default());
        assert_eq!(config.removal_page_policy, RemovalPagePolicy::Clamp);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial_config_uses_defaults() {
        let config = ViewConfig::from_yaml_str("page_size: 25\n").unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.default_sort, SortParams::default());
    }

    #[test]
    fn test_yaml_full_config() {
        let yaml = r#"
page_size: 5
default_sort:
  key: price
  direction: asc
removal_page_policy: preserve
event_capacity: 8
"#;
        let config = ViewConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config.default_sort,
            SortParams::new(SortKey::Price, SortDirection::Asc)
        );
        assert_eq!(config.removal_page_policy, RemovalPagePolicy::Preserve);
        assert_eq!(config.event_capacity, 8);
    }

    #[test]
    fn test_yaml_serialization() {
        let config = ViewConfig::default().with_page_size(20);
        let yaml = serde_yaml::to_string(&config).unwrap();

        // Should be able to parse it back
        let parsed = ViewConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_page_size_out_of_range_is_rejected() {
        let err = ViewConfig::from_yaml_str("page_size: 0\n").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_INVALID");

        let err = ViewConfig::from_yaml_str("page_size: 500\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_with_page_size_clamps() {
        assert_eq!(ViewConfig::default().with_page_size(0).page_size, 1);
        assert_eq!(ViewConfig::default().with_page_size(1000).page_size, 100);
    }

    #[test]
    fn test_seed_from_yaml_into_store() {
        let yaml = r#"
orders:
  - id: ORD-1
    name: Ada
    address: 1 Analytical Way
    date: "2024-01-01"
    price: "$10"
    status: pending
  - id: ORD-2
    name: Grace
    address: 2 Harbour St
    date: "2024-02-01"
    price: "$20"
    status: completed
"#;
        let seed = SeedData::from_yaml_str(yaml).unwrap();
        let store = seed.into_store().unwrap();
        assert_eq!(crate::core::store::RecordStore::len(&store), 2);
    }

    #[test]
    fn test_seed_with_unknown_status_fails() {
        let json = r#"{"orders": [{"id": "A", "name": "n", "address": "a",
            "date": "2024-01-01", "price": "$1", "status": "lost"}]}"#;
        let err = SeedData::from_json_str(json).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_JSON_ERROR");
    }
}
