//! End-to-end dispatch tests: callback ordering, outcomes and flags.

use std::sync::Arc;

use uri_router::dispatch::{LaunchFlags, OpenOutcome, Router};
use uri_router::routing::params::RAW_URI_PARAM;
use uri_router::{Destination, RouteRegistry, RouterError};

mod common;

use common::{CountingSource, RecordingCallback, RecordingContext, StartBehavior};

fn router() -> Router {
    let router = Router::new(Arc::new(RouteRegistry::new()));
    router.register("profile", Destination::new("ProfileScreen"));
    router
}

#[test]
fn test_open_profile_end_to_end() {
    let router = router();
    let ctx = RecordingContext::host();
    let callback = RecordingCallback::default();

    assert!(router.open_with(&ctx, "app://profile?uid=42", Some(&callback)));
    assert_eq!(callback.events(), vec!["before_open(false)", "after_open"]);

    let started = ctx.started();
    assert_eq!(started.len(), 1);
    let (request, code) = &started[0];
    assert_eq!(*code, None);
    assert_eq!(request.destination(), &Destination::new("ProfileScreen"));
    assert_eq!(request.parameter("uid"), Some("42"));
    assert_eq!(request.parameter(RAW_URI_PARAM), Some("app://profile?uid=42"));
    assert_eq!(request.invocation.parameters.len(), 2);
}

#[test]
fn test_not_found_sequence() {
    let router = router();
    let ctx = RecordingContext::host();
    let callback = RecordingCallback::default();

    assert!(!router.open_with(&ctx, "app://settings", Some(&callback)));
    assert_eq!(callback.events(), vec!["before_open(false)", "not_found"]);
    assert!(ctx.started().is_empty());
}

#[test]
fn test_veto_suppresses_everything() {
    let router = router();
    let ctx = RecordingContext::host();
    let callback = RecordingCallback::vetoing();

    let outcome = router.dispatch(&ctx, "app://profile", None, Some(&callback));
    assert!(matches!(outcome, OpenOutcome::Suppressed));
    assert_eq!(callback.events(), vec!["before_open(true)"]);
    assert!(ctx.started().is_empty());
}

#[test]
fn test_start_failure_reports_error_only() {
    let router = router();
    let ctx = RecordingContext::new(true, StartBehavior::Fail);
    let callback = RecordingCallback::default();

    assert!(!router.open_with(&ctx, "app://profile", Some(&callback)));
    assert_eq!(
        callback.events(),
        vec![
            "before_open(false)".to_string(),
            "error: failed to start 'ProfileScreen': destination refused to start".to_string(),
        ]
    );
}

#[test]
fn test_start_panic_is_contained() {
    let router = router();
    let ctx = RecordingContext::new(true, StartBehavior::Panic);
    let callback = RecordingCallback::default();

    let outcome = router.dispatch(&ctx, "app://profile", None, Some(&callback));
    match outcome {
        OpenOutcome::Errored(RouterError::Panicked { destination, message }) => {
            assert_eq!(destination, "ProfileScreen");
            assert_eq!(message, "destination crashed");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(callback.events().len(), 2);
}

#[test]
fn test_invalid_uri_is_errored() {
    let router = router();
    let ctx = RecordingContext::host();
    let callback = RecordingCallback::default();

    let outcome = router.dispatch(&ctx, "no scheme here", None, Some(&callback));
    assert!(matches!(outcome, OpenOutcome::Errored(RouterError::InvalidUri { .. })));
    let events = callback.events();
    assert_eq!(events[0], "before_open(false)");
    assert!(events[1].starts_with("error: invalid uri"));
}

#[test]
fn test_detached_context_sets_flags() {
    let router = router();
    let ctx = RecordingContext::detached();

    assert!(router.open_with(&ctx, "app://profile", None));
    let (request, _) = &ctx.started()[0];
    assert_eq!(request.flags, LaunchFlags::detached());
}

#[test]
fn test_open_for_result_from_host() {
    let router = router();
    let ctx = RecordingContext::host();

    assert!(router.open_for_result_with(&ctx, "app://PROFILE?Tab=posts", 7, None));
    let (request, code) = &ctx.started()[0];
    assert_eq!(*code, Some(7));
    assert_eq!(request.parameter("tab"), Some("posts"));
    assert_eq!(request.flags, LaunchFlags::default());
}

#[test]
fn test_open_for_result_from_detached_context_errors() {
    let router = router();
    let ctx = RecordingContext::detached();
    let callback = RecordingCallback::default();

    let outcome = router.dispatch(&ctx, "app://profile", Some(1), Some(&callback));
    assert!(matches!(outcome, OpenOutcome::Errored(RouterError::ResultUnsupported { .. })));
    assert!(ctx.started().is_empty());
    assert_eq!(
        callback.events(),
        vec![
            "before_open(false)".to_string(),
            "error: cannot start 'ProfileScreen' for result from a non-host context".to_string(),
        ]
    );
}

#[test]
fn test_default_callback() {
    let router = router();
    let ctx = RecordingContext::host();
    let callback = Arc::new(RecordingCallback::default());

    // No default callback: nothing recorded anywhere
    assert!(router.open(&ctx, "app://profile"));

    router.set_default_callback(Some(callback.clone()));
    assert!(router.open(&ctx, "app://profile"));
    assert!(!router.open_for_result(&ctx, "app://missing", 3));
    assert_eq!(
        callback.events(),
        vec!["before_open(false)", "after_open", "before_open(false)", "not_found"]
    );

    router.set_default_callback(None);
    assert!(router.open(&ctx, "app://profile"));
    assert_eq!(callback.events().len(), 4);
}

#[test]
fn test_resolve_only_does_not_start() {
    let router = router();
    let request = router.resolve("app://Profile?A=1").unwrap();
    assert_eq!(request.parameter("a"), Some("1"));
    assert_eq!(request.raw_uri(), "app://Profile?A=1");
    assert_eq!(request.flags, LaunchFlags::default());
    assert!(router.resolve("app://unknown").is_none());
}

#[test]
fn test_missing_key_loaded_once_across_dispatches() {
    let source = Arc::new(CountingSource::default());
    let router = Router::new(Arc::new(RouteRegistry::with_source(source.clone())));
    let ctx = RecordingContext::host();

    assert!(!router.open(&ctx, "app://ghost"));
    assert!(!router.open(&ctx, "app://GHOST?x=1"));
    assert!(router.resolve("app://ghost").is_none());
    assert_eq!(source.calls(), 1);

    // Registration overrides the cached absence
    router.register("ghost", Destination::new("GhostScreen"));
    assert!(router.open(&ctx, "app://ghost"));
    assert_eq!(source.calls(), 1);
}

#[test]
fn test_last_registration_wins() {
    let router = router();
    router.register("profile", Destination::new("ProfileV2"));
    let request = router.resolve("app://profile").unwrap();
    assert_eq!(request.destination(), &Destination::new("ProfileV2"));
}
