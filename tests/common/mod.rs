//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use uri_router::dispatch::{NavigationContext, NavigationRequest, RouterCallback};
use uri_router::error::StartError;
use uri_router::routing::MappingSource;
use uri_router::{Destination, MappingError, RouterError};

/// How a recording context reacts to a start.
#[derive(Clone, Copy)]
pub enum StartBehavior {
    Succeed,
    Fail,
    Panic,
}

/// Context that records every started request.
pub struct RecordingContext {
    pub host: bool,
    pub behavior: StartBehavior,
    pub started: Mutex<Vec<(NavigationRequest, Option<u32>)>>,
}

impl RecordingContext {
    pub fn host() -> Self {
        Self::new(true, StartBehavior::Succeed)
    }

    pub fn detached() -> Self {
        Self::new(false, StartBehavior::Succeed)
    }

    pub fn new(host: bool, behavior: StartBehavior) -> Self {
        Self {
            host,
            behavior,
            started: Mutex::new(Vec::new()),
        }
    }

    pub fn started(&self) -> Vec<(NavigationRequest, Option<u32>)> {
        self.started.lock().unwrap().clone()
    }

    fn record(&self, request: &NavigationRequest, code: Option<u32>) -> Result<(), StartError> {
        match self.behavior {
            StartBehavior::Succeed => {
                self.started.lock().unwrap().push((request.clone(), code));
                Ok(())
            }
            StartBehavior::Fail => Err("destination refused to start".into()),
            StartBehavior::Panic => panic!("destination crashed"),
        }
    }
}

impl NavigationContext for RecordingContext {
    fn is_navigation_host(&self) -> bool {
        self.host
    }

    fn start(&self, request: &NavigationRequest) -> Result<(), StartError> {
        self.record(request, None)
    }

    fn start_for_result(&self, request: &NavigationRequest, request_code: u32) -> Result<(), StartError> {
        self.record(request, Some(request_code))
    }
}

/// Callback that records the sequence of hooks it receives.
#[derive(Default)]
pub struct RecordingCallback {
    pub veto: bool,
    pub events: Mutex<Vec<String>>,
}

impl RecordingCallback {
    pub fn vetoing() -> Self {
        Self {
            veto: true,
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl RouterCallback for RecordingCallback {
    fn before_open(&self, _ctx: &dyn NavigationContext, _uri: &str) -> bool {
        self.push(format!("before_open({})", self.veto));
        self.veto
    }

    fn after_open(&self, _ctx: &dyn NavigationContext, _uri: &str) {
        self.push("after_open".into());
    }

    fn not_found(&self, _ctx: &dyn NavigationContext, _uri: &str) {
        self.push("not_found".into());
    }

    fn error(&self, _ctx: &dyn NavigationContext, _uri: &str, error: &RouterError) {
        self.push(format!("error: {}", error));
    }
}

/// Mapping source that counts loads and never finds anything.
#[derive(Default)]
pub struct CountingSource {
    pub calls: AtomicUsize,
}

impl CountingSource {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MappingSource for CountingSource {
    fn load(&self, lookup_name: &str) -> Result<Destination, MappingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(MappingError::NotFound {
            lookup_name: lookup_name.to_string(),
        })
    }
}
