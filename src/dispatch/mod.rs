//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! caller → router.rs open()/open_for_result()
//!     → callback.rs before_open (may veto)
//!     → routing::Resolver (resolve URI)
//!     → context.rs NavigationContext::start / start_for_result
//!     → callback.rs after_open | not_found | error
//!     → bool / OpenOutcome back to the caller
//! ```

pub mod callback;
pub mod context;
pub mod router;

pub use callback::{RouterCallback, TracingCallback};
pub use context::{LaunchFlags, NavigationContext, NavigationRequest};
pub use router::{OpenOutcome, Router};
