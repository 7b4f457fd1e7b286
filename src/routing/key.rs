//! Routing keys and destinations.
//!
//! # Design Decisions
//! - Routing keys compare case-insensitively; the raw text is kept for
//!   building mapping lookup names
//! - Destinations are opaque named handles, interpreted only by the
//!   navigation context that starts them

use std::fmt;
use serde::{Deserialize, Serialize};

/// Case-insensitive identifier of a destination family (a URI host).
#[derive(Debug, Clone)]
pub struct RoutingKey {
    raw: String,
    folded: String,
}

impl RoutingKey {
    /// Create a routing key.
    /// The comparison form is normalized to lowercase.
    pub fn new(key: impl Into<String>) -> Self {
        let raw = key.into();
        let folded = raw.to_lowercase();
        Self { raw, folded }
    }

    /// The key as it was written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The lowercase form used for comparisons.
    pub fn folded(&self) -> &str {
        &self.folded
    }
}

impl PartialEq for RoutingKey {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for RoutingKey {}

impl std::hash::Hash for RoutingKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl fmt::Display for RoutingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.raw)
    }
}

impl From<&str> for RoutingKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for RoutingKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

/// Opaque handle to "where to go".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Destination(String);

impl Destination {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for Destination {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
