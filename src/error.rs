//! Error definitions for routing and dispatch.

use thiserror::Error;

/// Boxed error returned by a [`NavigationContext`](crate::dispatch::NavigationContext)
/// when it fails to start a destination.
pub type StartError = Box<dyn std::error::Error + Send + Sync>;

/// Errors reported through the `error` callback of a dispatch.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The URI string could not be parsed.
    #[error("invalid uri '{uri}': {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: url::ParseError,
    },

    /// A result code was requested from a context that is not a navigation host.
    #[error("cannot start '{destination}' for result from a non-host context")]
    ResultUnsupported { destination: String },

    /// The context failed to start the destination.
    #[error("failed to start '{destination}': {source}")]
    Navigation {
        destination: String,
        #[source]
        source: StartError,
    },

    /// The context panicked while starting the destination.
    #[error("panic while starting '{destination}': {message}")]
    Panicked { destination: String, message: String },
}

/// Failures of the external mapping source.
///
/// Never surfaced to dispatch callers: the registry folds every variant into
/// an absent entry.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("no mapping named '{lookup_name}'")]
    NotFound { lookup_name: String },

    #[error("mapping '{lookup_name}' failed to load: {reason}")]
    Load { lookup_name: String, reason: String },

    #[error("mapping '{lookup_name}' panicked while loading")]
    Panicked { lookup_name: String },
}

/// Extract a readable message from a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RouterError::ResultUnsupported {
            destination: "ProfileScreen".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot start 'ProfileScreen' for result from a non-host context"
        );

        let err = MappingError::NotFound {
            lookup_name: "RouterMapping_profile".into(),
        };
        assert_eq!(err.to_string(), "no mapping named 'RouterMapping_profile'");
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_message(payload.as_ref()), "bang");

        let payload: Box<dyn std::any::Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic payload");
    }
}
