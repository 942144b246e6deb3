// Application state module
// Shared state assembled once at startup and cloned into each connection

use std::sync::atomic::AtomicBool;

use super::types::Config;
use crate::routing::Router;
use crate::view::ViewRenderer;

/// Application state
///
/// Owns the loaded configuration, the route table, and the injected template
/// renderer. Built once in `main` and shared behind an `Arc`.
pub struct AppState {
    pub config: Config,
    pub router: Router,
    pub renderer: Box<dyn ViewRenderer>,

    // Cached config value for fast access without locks on the hot path
    pub cached_access_log: AtomicBool,
}

impl AppState {
    pub fn new(config: Config, router: Router, renderer: Box<dyn ViewRenderer>) -> Self {
        let cached_access_log = AtomicBool::new(config.logging.access_log);

        Self {
            config,
            router,
            renderer,
            cached_access_log,
        }
    }
}
