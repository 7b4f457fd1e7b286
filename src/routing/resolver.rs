//! URI resolution.
//!
//! # Responsibilities
//! - Parse URI strings and derive the routing key from the host
//! - Populate the registry for that key on demand
//! - Build the resolved invocation (destination + parameters + raw URI)
//!
//! # Design Decisions
//! - Exact host match only (case-insensitive), no path or wildcard routing
//! - A URI without a host resolves under the empty key, which never matches
//!   a mapped destination unless one is registered for it explicitly
//! - Scheme and path are carried in the raw URI but not interpreted
//! - The routing key is the host as written in the raw string; the parsed
//!   `Url` normalizes hosts of special schemes (`http`, `file`, ...) and is
//!   only used for query parameters

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use url::Url;

use crate::error::RouterError;
use crate::routing::key::{Destination, RoutingKey};
use crate::routing::params::{self, RAW_URI_PARAM};
use crate::routing::registry::RouteRegistry;

/// A parsed URI together with the string it was parsed from.
#[derive(Debug, Clone)]
pub struct RouteUri {
    raw: String,
    url: Url,
}

impl RouteUri {
    pub fn parse(raw: impl Into<String>) -> Result<Self, RouterError> {
        let raw = raw.into();
        match Url::parse(&raw) {
            Ok(url) => Ok(Self { raw, url }),
            Err(source) => Err(RouterError::InvalidUri { uri: raw, source }),
        }
    }

    /// Routing key derived from the host segment, as written.
    pub fn routing_key(&self) -> RoutingKey {
        RoutingKey::new(raw_host(&self.raw))
    }

    /// The string this URI was parsed from.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl std::str::FromStr for RouteUri {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Host text of `raw`: the authority after `://` without userinfo and port.
/// Empty when the URI has no authority.
fn raw_host(raw: &str) -> &str {
    let Some((_, rest)) = raw.split_once("://") else {
        return "";
    };
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);

    if host.starts_with('[') {
        // IPv6 literal keeps its colons
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    host.split(':').next().unwrap_or_default()
}

/// Destination plus everything the destination receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedInvocation {
    pub destination: Destination,
    pub parameters: HashMap<String, String>,
    pub raw_uri: String,
}

/// Resolves URIs against a shared registry.
#[derive(Debug, Clone)]
pub struct Resolver {
    registry: Arc<RouteRegistry>,
}

impl Resolver {
    pub fn new(registry: Arc<RouteRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<RouteRegistry> {
        &self.registry
    }

    /// Resolve `uri`. Returns `None` when no destination matches.
    pub fn resolve(&self, uri: &RouteUri) -> Option<ResolvedInvocation> {
        let key = uri.routing_key();
        self.registry.ensure_populated(&key);

        let destination = match self.registry.lookup(&key) {
            Some(d) => d,
            None => {
                tracing::debug!(routing_key = %key, uri = %uri.as_str(), "No destination for routing key");
                return None;
            }
        };

        let mut parameters = params::extract(uri.url());
        parameters.insert(RAW_URI_PARAM.to_string(), uri.as_str().to_string());

        tracing::debug!(
            routing_key = %key,
            destination = %destination,
            param_count = parameters.len(),
            "URI resolved"
        );

        Some(ResolvedInvocation {
            destination,
            parameters,
            raw_uri: uri.as_str().to_string(),
        })
    }
}
