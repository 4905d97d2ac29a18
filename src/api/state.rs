//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::catalog::ReferenceStore;
use crate::config::ServerConfig;
use crate::metrics::MetricsSource;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only reference tables
    pub store: Arc<ReferenceStore>,
    /// Admin metrics API (or a stand-in)
    pub source: Arc<dyn MetricsSource>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        store: Arc<ReferenceStore>,
        source: Arc<dyn MetricsSource>,
        config: ServerConfig,
    ) -> Self {
        Self {
            store,
            source,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
