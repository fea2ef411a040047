//! Typed error handling for the order view
//!
//! Derivation itself never fails: malformed records fall back to sentinel
//! values and invalid navigation is clamped. Errors only arise at the edges,
//! when seed data, configuration or string tags coming from the display layer
//! are turned into typed values.
//!
//! # Error Categories
//!
//! - [`StoreError`]: Record store invariants violated by seed data
//! - [`ConfigError`]: Configuration and seed file loading/validation
//! - [`ParseError`]: Unknown sort keys, statuses or directions
//!
//! # Example
//!
//! ```rust,ignore
//! use order_view::prelude::*;
//!
//! match SeedData::load_store("orders.json") {
//!     Ok(store) => println!("seeded {} orders", store.len()),
//!     Err(ViewError::Store(StoreError::DuplicateId { id })) => {
//!         eprintln!("order {} appears twice in the seed", id);
//!     }
//!     Err(e) => eprintln!("Other error: {} ({})", e, e.error_code()),
//! }
//! ```

use thiserror::Error;

/// Convenience alias used across the crate
pub type Result<T, E = ViewError> = std::result::Result<T, E>;

/// The main error type for the order view
#[derive(Debug, Error)]
pub enum ViewError {
    /// Record store errors
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration and seed loading errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Tag parsing errors
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ViewError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ViewError::Store(e) => e.error_code(),
            ViewError::Config(e) => e.error_code(),
            ViewError::Parse(e) => e.error_code(),
        }
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors related to record store seeding
#[derive(Debug, Error)]
pub enum StoreError {
    /// Two records share the same identifier
    #[error("record with id '{id}' already exists")]
    DuplicateId { id: String },
}

impl StoreError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::DuplicateId { .. } => "DUPLICATE_RECORD_ID",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration and seed data
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Could not read a file from disk
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// YAML document could not be parsed
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON document could not be parsed
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsed configuration failed validation
    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "CONFIG_IO_ERROR",
            ConfigError::Yaml(_) => "CONFIG_YAML_ERROR",
            ConfigError::Json(_) => "CONFIG_JSON_ERROR",
            ConfigError::Invalid { .. } => "CONFIG_INVALID",
        }
    }
}

impl From<validator::ValidationErrors> for ConfigError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ConfigError::Invalid {
            message: errors.to_string(),
        }
    }
}

// =============================================================================
// Parse Errors
// =============================================================================

/// Errors raised when a string tag does not name a known value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown sort key '{key}'")]
    UnknownSortKey { key: String },

    #[error("unknown order status '{value}'")]
    UnknownStatus { value: String },

    #[error("unknown sort direction '{value}'")]
    UnknownDirection { value: String },
}

impl ParseError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ParseError::UnknownSortKey { .. } => "UNKNOWN_SORT_KEY",
            ParseError::UnknownStatus { .. } => "UNKNOWN_STATUS",
            ParseError::UnknownDirection { .. } => "UNKNOWN_SORT_DIRECTION",
        }
    }
}
