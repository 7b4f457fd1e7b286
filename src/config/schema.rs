//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

use crate::routing::key::Destination;
use crate::routing::mapping::{MappingTable, DEFAULT_MAPPING_PREFIX};

/// Root configuration for the router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Routes registered at startup.
    pub routes: Vec<RouteConfig>,

    /// Mapping table consulted lazily on registry misses.
    pub mapping: MappingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// A static route registration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Routing key (URI host), matched case-insensitively.
    pub key: String,

    /// Destination to register under the key.
    pub destination: Destination,
}

/// Lazily consulted mapping table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Lookup name prefix; names are `<prefix>_<routingKey>`.
    pub prefix: String,

    /// Table entries keyed by full lookup name.
    pub entries: Vec<MappingEntryConfig>,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_MAPPING_PREFIX.to_string(),
            entries: Vec::new(),
        }
    }
}

impl MappingConfig {
    /// Build the mapping table from the configured entries.
    pub fn to_table(&self) -> MappingTable {
        self.entries
            .iter()
            .map(|e| (e.name.clone(), e.destination.clone()))
            .collect()
    }
}

/// A single mapping table entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MappingEntryConfig {
    /// Full lookup name, e.g. `RouterMapping_settings`.
    pub name: String,

    pub destination: Destination,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9100".to_string(),
        }
    }
}
