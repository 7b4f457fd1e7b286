//! Navigation dispatcher.
//!
//! # Responsibilities
//! - Run the before-open interceptor
//! - Resolve the URI and start the destination through the caller's context
//! - Report exactly one outcome per dispatch (opened, not found, errored)
//!
//! # State Machine
//! ```text
//! Start ──before_open=true──▶ Suppressed
//!   │
//!   ▼
//! Resolving ──no match──▶ NotFound
//!   │
//!   ▼
//! Invoking ──error/panic──▶ Errored
//!   │
//!   ▼
//! Opened
//! ```
//!
//! # Design Decisions
//! - Faults from parsing and starting never escape a dispatch; they become
//!   `Errored` and a `false` return
//! - A panic inside `before_open` is not caught
//! - Requesting a result from a non-host context is reported as `Errored`

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

use crate::config::schema::RouterConfig;
use crate::dispatch::callback::RouterCallback;
use crate::dispatch::context::{LaunchFlags, NavigationContext, NavigationRequest};
use crate::error::{panic_message, RouterError};
use crate::observability::metrics;
use crate::routing::key::{Destination, RoutingKey};
use crate::routing::registry::RouteRegistry;
use crate::routing::resolver::{ResolvedInvocation, Resolver, RouteUri};

/// Result of a single dispatch.
#[derive(Debug)]
pub enum OpenOutcome {
    /// `before_open` vetoed the dispatch.
    Suppressed,
    /// The destination was started with this request.
    Opened(NavigationRequest),
    /// No destination matched the routing key.
    NotFound,
    /// Parsing or starting failed.
    Errored(RouterError),
}

impl OpenOutcome {
    pub fn is_opened(&self) -> bool {
        matches!(self, OpenOutcome::Opened(_))
    }

    /// Metric and log label.
    pub fn label(&self) -> &'static str {
        match self {
            OpenOutcome::Suppressed => "suppressed",
            OpenOutcome::Opened(_) => "opened",
            OpenOutcome::NotFound => "not_found",
            OpenOutcome::Errored(_) => "errored",
        }
    }
}

/// URI router: registry access, resolution and dispatch.
pub struct Router {
    resolver: Resolver,
    default_callback: RwLock<Option<Arc<dyn RouterCallback>>>,
}

impl Router {
    pub fn new(registry: Arc<RouteRegistry>) -> Self {
        Self {
            resolver: Resolver::new(registry),
            default_callback: RwLock::new(None),
        }
    }

    /// Build a router from configuration: mapping table as the lazy source,
    /// static routes registered up front.
    pub fn from_config(config: &RouterConfig) -> Self {
        let table = config.mapping.to_table();
        tracing::debug!(
            prefix = %config.mapping.prefix,
            mappings = table.len(),
            "Mapping table loaded"
        );
        let registry = RouteRegistry::with_prefix(config.mapping.prefix.clone(), Arc::new(table));
        let router = Self::new(Arc::new(registry));
        router.apply_routes(config);
        router
    }

    /// Register every static route in `config`.
    pub fn apply_routes(&self, config: &RouterConfig) {
        for route in &config.routes {
            self.register(route.key.as_str(), route.destination.clone());
        }
        tracing::info!(routes = config.routes.len(), "Static routes registered");
    }

    pub fn registry(&self) -> &Arc<RouteRegistry> {
        self.resolver.registry()
    }

    /// Register `destination` under `key`, overwriting any existing entry.
    pub fn register(&self, key: impl Into<RoutingKey>, destination: Destination) {
        self.registry().register(key, destination);
    }

    /// Set or clear the callback used by the overloads without one.
    pub fn set_default_callback(&self, callback: Option<Arc<dyn RouterCallback>>) {
        *self.default_callback.write().unwrap_or_else(PoisonError::into_inner) = callback;
    }

    pub fn default_callback(&self) -> Option<Arc<dyn RouterCallback>> {
        self.default_callback
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Open `uri` with the default callback.
    pub fn open(&self, ctx: &dyn NavigationContext, uri: &str) -> bool {
        let callback = self.default_callback();
        self.open_with(ctx, uri, callback.as_deref())
    }

    /// Open `uri` with an explicit callback.
    pub fn open_with(&self, ctx: &dyn NavigationContext, uri: &str, callback: Option<&dyn RouterCallback>) -> bool {
        self.dispatch(ctx, uri, None, callback).is_opened()
    }

    /// Open `uri` for a result with the default callback.
    pub fn open_for_result(&self, ctx: &dyn NavigationContext, uri: &str, request_code: u32) -> bool {
        let callback = self.default_callback();
        self.open_for_result_with(ctx, uri, request_code, callback.as_deref())
    }

    /// Open `uri` for a result with an explicit callback.
    pub fn open_for_result_with(
        &self,
        ctx: &dyn NavigationContext,
        uri: &str,
        request_code: u32,
        callback: Option<&dyn RouterCallback>,
    ) -> bool {
        self.dispatch(ctx, uri, Some(request_code), callback).is_opened()
    }

    /// Resolve `uri` into a request without starting it. Flags are left
    /// unset for the caller to adjust.
    pub fn resolve(&self, uri: &str) -> Option<NavigationRequest> {
        let uri = match RouteUri::parse(uri) {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!(error = %e, "Cannot resolve");
                return None;
            }
        };
        self.resolver.resolve(&uri).map(NavigationRequest::new)
    }

    /// Run one dispatch and report its outcome to `callback`.
    pub fn dispatch(
        &self,
        ctx: &dyn NavigationContext,
        uri: &str,
        request_code: Option<u32>,
        callback: Option<&dyn RouterCallback>,
    ) -> OpenOutcome {
        let dispatch_id = Uuid::new_v4();
        let span = tracing::info_span!("route.open", %dispatch_id, uri = %uri, request_code = ?request_code);
        let _enter = span.enter();

        if let Some(cb) = callback {
            if cb.before_open(ctx, uri) {
                tracing::debug!("Dispatch suppressed by callback");
                metrics::record_open("suppressed");
                return OpenOutcome::Suppressed;
            }
        }

        let outcome = match RouteUri::parse(uri) {
            Err(e) => OpenOutcome::Errored(e),
            Ok(route_uri) => match self.resolver.resolve(&route_uri) {
                Some(invocation) => self.invoke(ctx, invocation, request_code),
                None => OpenOutcome::NotFound,
            },
        };

        match &outcome {
            OpenOutcome::Opened(request) => {
                tracing::debug!(destination = %request.destination(), flags = ?request.flags, "Destination started");
            }
            OpenOutcome::NotFound => tracing::debug!("No destination matched"),
            OpenOutcome::Errored(e) => tracing::warn!(error = %e, "Dispatch failed"),
            OpenOutcome::Suppressed => {}
        }
        metrics::record_open(outcome.label());

        if let Some(cb) = callback {
            match &outcome {
                OpenOutcome::Opened(_) => cb.after_open(ctx, uri),
                OpenOutcome::NotFound => cb.not_found(ctx, uri),
                OpenOutcome::Errored(e) => cb.error(ctx, uri, e),
                OpenOutcome::Suppressed => {}
            }
        }

        outcome
    }

    fn invoke(&self, ctx: &dyn NavigationContext, invocation: ResolvedInvocation, request_code: Option<u32>) -> OpenOutcome {
        let destination = invocation.destination.to_string();
        let navigation_error = |source| RouterError::Navigation {
            destination: destination.clone(),
            source,
        };

        // Everything that touches the context runs under the guard.
        let started = catch_unwind(AssertUnwindSafe(|| {
            let is_host = ctx.is_navigation_host();
            let mut request = NavigationRequest::new(invocation);
            if !is_host {
                request.flags = LaunchFlags::detached();
            }

            let result = match request_code {
                Some(_) if !is_host => Err(RouterError::ResultUnsupported {
                    destination: destination.clone(),
                }),
                Some(code) => ctx.start_for_result(&request, code).map_err(navigation_error),
                None => ctx.start(&request).map_err(navigation_error),
            };
            result.map(|()| request)
        }));

        match started {
            Ok(Ok(request)) => OpenOutcome::Opened(request),
            Ok(Err(e)) => OpenOutcome::Errored(e),
            Err(payload) => OpenOutcome::Errored(RouterError::Panicked {
                destination,
                message: panic_message(payload.as_ref()),
            }),
        }
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("registry", self.registry())
            .field("default_callback", &self.default_callback().is_some())
            .finish()
    }
}
