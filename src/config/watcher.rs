//! Route file watcher.
//!
//! Every change to the route file is reloaded and validated off the dispatch
//! path; only configs that pass validation reach the receiver, which then
//! re-registers their static routes. A broken edit leaves the current routes
//! in place.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::RouterConfig;

/// Watches a route file and forwards each valid reload.
pub struct RouteFileWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RouterConfig>,
}

impl RouteFileWatcher {
    /// Returns the watcher and the receiver for reloaded route configs.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RouterConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Start watching. The returned handle must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let mut handle = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    self.reload();
                }
                Ok(_) => {}
                Err(e) => tracing::error!(path = ?self.path, error = ?e, "Route file watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;
        handle.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Watching route file");
        Ok(handle)
    }

    /// Load the route file and forward it. Returns whether a config was sent.
    fn reload(&self) -> bool {
        let config = match load_config(&self.path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(path = ?self.path, error = %e, "Route file rejected, keeping current routes");
                return false;
            }
        };

        let keys: Vec<&str> = config.routes.iter().map(|r| r.key.as_str()).collect();
        tracing::info!(
            path = ?self.path,
            routes = ?keys,
            mappings = config.mapping.entries.len(),
            "Route file changed, re-registering static routes"
        );

        if self.update_tx.send(config).is_err() {
            tracing::warn!("Route reload receiver dropped");
            return false;
        }
        true
    }
}
