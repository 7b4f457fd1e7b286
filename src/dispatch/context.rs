//! Navigation context and invocation descriptors.
//!
//! The context is the host-side collaborator that actually starts a
//! destination. The router only decides what to start and how to flag it.

use serde::Serialize;

use crate::error::StartError;
use crate::routing::key::Destination;
use crate::routing::resolver::ResolvedInvocation;

/// Launch flags applied to a navigation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LaunchFlags {
    /// Start the destination in a fresh task.
    pub new_task: bool,
    /// Reuse the destination if it is already on top.
    pub single_top: bool,
}

impl LaunchFlags {
    /// Flags for a request started from outside a navigation host.
    pub fn detached() -> Self {
        Self {
            new_task: true,
            single_top: true,
        }
    }
}

/// A resolved invocation ready to be started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationRequest {
    #[serde(flatten)]
    pub invocation: ResolvedInvocation,
    pub flags: LaunchFlags,
}

impl NavigationRequest {
    pub fn new(invocation: ResolvedInvocation) -> Self {
        Self {
            invocation,
            flags: LaunchFlags::default(),
        }
    }

    pub fn destination(&self) -> &Destination {
        &self.invocation.destination
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.invocation.parameters.get(name).map(String::as_str)
    }

    pub fn raw_uri(&self) -> &str {
        &self.invocation.raw_uri
    }
}

/// Caller-side capability that starts destinations.
pub trait NavigationContext {
    /// Returns true if this context is itself a navigation host, able to
    /// stack destinations and receive results.
    fn is_navigation_host(&self) -> bool;

    /// Start the destination.
    fn start(&self, request: &NavigationRequest) -> Result<(), StartError>;

    /// Start the destination and deliver its result under `request_code`.
    /// Only called on navigation hosts.
    fn start_for_result(&self, request: &NavigationRequest, request_code: u32) -> Result<(), StartError>;
}
