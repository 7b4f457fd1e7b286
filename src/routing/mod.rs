//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! URI string
//!     → resolver.rs (parse, derive routing key from host)
//!     → registry.rs (ensure populated; on miss consult mapping.rs,
//!                    cache absent on failure)
//!     → registry.rs (case-insensitive scan for a mapped destination)
//!     → params.rs (extract query parameters, inject raw URI)
//!     → Return: ResolvedInvocation or None
//! ```
//!
//! # Design Decisions
//! - The registry is an explicit, injected instance (no global state)
//! - Lazy population goes through a pluggable loader, not reflection
//! - A key whose load failed is never loaded again; `register` overrides it

pub mod key;
pub mod mapping;
pub mod params;
pub mod registry;
pub mod resolver;

pub use key::{Destination, RoutingKey};
pub use mapping::{MappingSource, MappingTable, NoMappingSource};
pub use registry::{RouteEntry, RouteRegistry, RouteSlot};
pub use resolver::{ResolvedInvocation, Resolver, RouteUri};
