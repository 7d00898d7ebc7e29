mod client;
mod config;
mod factory;
mod route;

pub use self::client::ApiClient;
pub use self::config::{ConsoleConfig, ToggleMode};
pub use self::factory::{FactoryCatalog, FactoryEntry, FactoryInfo, FactoryKind, FactoryParameter};
pub use self::route::{FilterSpec, PredicateSpec, Route};

/// Argument map of a predicate or filter, keyed by factory-specific names.
/// `serde_json::Map` keeps keys in a stable order, so transcoding a
/// sub-document to text and back is deterministic.
pub type ArgMap = serde_json::Map<String, serde_json::Value>;
