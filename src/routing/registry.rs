//! Destination registry.
//!
//! # Responsibilities
//! - Map routing keys to destinations (or an absent marker)
//! - Populate missing keys lazily from a [`MappingSource`]
//! - Cache failed loads so a key is loaded at most once
//!
//! # Design Decisions
//! - Copy-on-write: writers build a new entry list and swap it in, readers
//!   scan an immutable snapshot and never observe a half-written entry
//! - Writers are serialized by a single mutex held across check, load and
//!   store, so concurrent misses on one key load it once
//! - One entry per case-folded key; a later registration replaces the slot
//!   in place and keeps its scan position

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwap;

use crate::error::{panic_message, MappingError};
use crate::observability::metrics;
use crate::routing::key::{Destination, RoutingKey};
use crate::routing::mapping::{lookup_name, MappingSource, NoMappingSource, DEFAULT_MAPPING_PREFIX};

/// Registry slot for a routing key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteSlot {
    /// A destination is registered.
    Mapped(Destination),
    /// Lookup failed; the key will not be loaded again.
    Absent,
}

/// A registry entry as seen by readers.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub key: RoutingKey,
    pub slot: RouteSlot,
}

/// Process-wide table of routing keys to destinations.
pub struct RouteRegistry {
    entries: ArcSwap<Vec<RouteEntry>>,
    write_lock: Mutex<()>,
    source: Arc<dyn MappingSource>,
    prefix: String,
}

impl RouteRegistry {
    /// Registry with no external mapping source.
    pub fn new() -> Self {
        Self::with_source(Arc::new(NoMappingSource))
    }

    /// Registry backed by `source` under the default lookup prefix.
    pub fn with_source(source: Arc<dyn MappingSource>) -> Self {
        Self::with_prefix(DEFAULT_MAPPING_PREFIX, source)
    }

    /// Registry backed by `source` under a custom lookup prefix.
    pub fn with_prefix(prefix: impl Into<String>, source: Arc<dyn MappingSource>) -> Self {
        Self {
            entries: ArcSwap::from_pointee(Vec::new()),
            write_lock: Mutex::new(()),
            source,
            prefix: prefix.into(),
        }
    }

    /// Register `destination` under `key`, overwriting any existing entry,
    /// including an absent marker.
    pub fn register(&self, key: impl Into<RoutingKey>, destination: Destination) {
        let key = key.into();
        let _guard = self.lock();
        tracing::debug!(routing_key = %key, destination = %destination, "Registering route");
        self.store(key, RouteSlot::Mapped(destination));
    }

    /// Make sure `key` has an entry, loading it from the mapping source if
    /// absent. A failed load records an absent marker.
    pub fn ensure_populated(&self, key: &RoutingKey) {
        if self.contains(key) {
            return;
        }

        let _guard = self.lock();
        // Another writer may have populated the key while we waited.
        if self.contains(key) {
            return;
        }

        let name = lookup_name(&self.prefix, key);
        let slot = match self.load(&name) {
            Ok(destination) => {
                tracing::debug!(routing_key = %key, lookup_name = %name, destination = %destination, "Mapping loaded");
                metrics::record_mapping_load(true);
                RouteSlot::Mapped(destination)
            }
            Err(e) => {
                tracing::warn!(routing_key = %key, lookup_name = %name, error = %e, "Mapping unavailable, caching absent entry");
                metrics::record_mapping_load(false);
                RouteSlot::Absent
            }
        };
        self.store(key.clone(), slot);
    }

    /// First mapped destination whose key matches `key`, ignoring case.
    pub fn lookup(&self, key: &RoutingKey) -> Option<Destination> {
        let snapshot = self.entries.load();
        snapshot.iter().find_map(|entry| match &entry.slot {
            RouteSlot::Mapped(dest) if entry.key == *key => Some(dest.clone()),
            _ => None,
        })
    }

    /// Returns true if `key` has an entry, mapped or absent.
    pub fn contains(&self, key: &RoutingKey) -> bool {
        self.entries.load().iter().any(|entry| entry.key == *key)
    }

    /// Snapshot of all entries in registration order.
    pub fn entries(&self) -> Vec<RouteEntry> {
        Vec::clone(&self.entries.load())
    }

    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.load().is_empty()
    }

    /// Lookup name prefix used for the mapping source.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn load(&self, name: &str) -> Result<Destination, MappingError> {
        catch_unwind(AssertUnwindSafe(|| self.source.load(name))).unwrap_or_else(|payload| {
            tracing::error!(lookup_name = %name, panic = %panic_message(payload.as_ref()), "Mapping source panicked");
            Err(MappingError::Panicked {
                lookup_name: name.to_string(),
            })
        })
    }

    // Caller must hold the write lock.
    fn store(&self, key: RoutingKey, slot: RouteSlot) {
        let mut next = Vec::clone(&self.entries.load());
        match next.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => {
                entry.key = key;
                entry.slot = slot;
            }
            None => next.push(RouteEntry { key, slot }),
        }
        self.entries.store(Arc::new(next));
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded state is the snapshot, which is never left half-written.
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RouteRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteRegistry")
            .field("prefix", &self.prefix)
            .field("len", &self.len())
            .finish()
    }
}
