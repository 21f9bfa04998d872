//! Shared application state for the server.

use std::sync::Arc;
use std::time::Instant;

use airgraph_core::Catalog;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The flight network engine behind its read-write lock.
    pub catalog: Arc<Catalog>,
    /// When the daemon started, for uptime reporting.
    pub start_time: Instant,
}

impl AppState {
    /// Create state around a catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            start_time: Instant::now(),
        }
    }

    /// Seconds since the daemon started.
    pub fn uptime_seconds(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }
}
