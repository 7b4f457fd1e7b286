//! URI navigation router library.
//!
//! Maps URI hosts to destinations, resolves URIs into invocation
//! descriptors and dispatches them through a caller-supplied context with
//! before/after/not-found/error callbacks.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use dispatch::{NavigationContext, NavigationRequest, OpenOutcome, Router, RouterCallback};
pub use error::{MappingError, RouterError};
pub use routing::{Destination, RouteRegistry, RoutingKey};
