//! Record trait defining the identity abstraction used by stores

/// Base trait for every record held by a store.
///
/// A record only needs a stable string key. Everything else about it
/// (which fields it exposes, how they sort) is described by the concrete
/// record type.
pub trait Record: Clone + Send + Sync + 'static {
    /// The singular resource name, used in log messages (e.g., "order")
    fn resource_name() -> &'static str;

    /// Get the unique identifier for this record
    fn id(&self) -> &str;
}
