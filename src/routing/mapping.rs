//! External mapping sources for lazy registry population.
//!
//! # Responsibilities
//! - Define the loader interface consulted on a registry miss
//! - Provide a data-driven table (generated or configured mappings)
//! - Derive lookup names from routing keys
//!
//! # Design Decisions
//! - Lookup name is `<prefix>_<routingKey>` with the key as written in the
//!   URI; generated tables depend on this convention
//! - Loads are synchronous and never retried by the registry

use std::collections::HashMap;

use crate::error::MappingError;
use crate::routing::key::{Destination, RoutingKey};

/// Default prefix of mapping lookup names.
pub const DEFAULT_MAPPING_PREFIX: &str = "RouterMapping";

/// Build the lookup name for `key` under `prefix`.
pub fn lookup_name(prefix: &str, key: &RoutingKey) -> String {
    format!("{}_{}", prefix, key.as_str())
}

/// Loader consulted when the registry has no entry for a routing key.
pub trait MappingSource: Send + Sync {
    /// Load the destination published under `lookup_name`.
    fn load(&self, lookup_name: &str) -> Result<Destination, MappingError>;
}

impl<F> MappingSource for F
where
    F: Fn(&str) -> Result<Destination, MappingError> + Send + Sync,
{
    fn load(&self, lookup_name: &str) -> Result<Destination, MappingError> {
        self(lookup_name)
    }
}

/// A source that never has a mapping.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMappingSource;

impl MappingSource for NoMappingSource {
    fn load(&self, lookup_name: &str) -> Result<Destination, MappingError> {
        Err(MappingError::NotFound {
            lookup_name: lookup_name.to_string(),
        })
    }
}

/// Mapping table held as plain data, keyed by lookup name.
#[derive(Debug, Default, Clone)]
pub struct MappingTable {
    entries: HashMap<String, Destination>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Returns the previous destination under that name.
    pub fn insert(&mut self, lookup_name: impl Into<String>, destination: Destination) -> Option<Destination> {
        self.entries.insert(lookup_name.into(), destination)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Destination)> for MappingTable {
    fn from_iter<I: IntoIterator<Item = (String, Destination)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl MappingSource for MappingTable {
    fn load(&self, lookup_name: &str) -> Result<Destination, MappingError> {
        self.entries
            .get(lookup_name)
            .cloned()
            .ok_or_else(|| MappingError::NotFound {
                lookup_name: lookup_name.to_string(),
            })
    }
}
