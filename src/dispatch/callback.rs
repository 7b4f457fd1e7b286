//! Dispatch callbacks.
//!
//! # Ordering
//! ```text
//! before_open → (veto: stop) | exactly one of after_open / not_found / error
//! ```

use crate::dispatch::context::NavigationContext;
use crate::error::RouterError;

/// Hooks observing a single dispatch. Every hook has a no-op default.
pub trait RouterCallback: Send + Sync {
    /// Called first. Returning true suppresses the dispatch; no other hook
    /// fires. Must not panic.
    fn before_open(&self, _ctx: &dyn NavigationContext, _uri: &str) -> bool {
        false
    }

    fn after_open(&self, _ctx: &dyn NavigationContext, _uri: &str) {}

    fn not_found(&self, _ctx: &dyn NavigationContext, _uri: &str) {}

    fn error(&self, _ctx: &dyn NavigationContext, _uri: &str, _error: &RouterError) {}
}

/// Callback that logs every outcome and never vetoes.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingCallback;

impl RouterCallback for TracingCallback {
    fn after_open(&self, _ctx: &dyn NavigationContext, uri: &str) {
        tracing::info!(uri = %uri, "Destination opened");
    }

    fn not_found(&self, _ctx: &dyn NavigationContext, uri: &str) {
        tracing::warn!(uri = %uri, "No destination matched");
    }

    fn error(&self, _ctx: &dyn NavigationContext, uri: &str, error: &RouterError) {
        tracing::error!(uri = %uri, error = %error, "Failed to open destination");
    }
}
