//! Application state

use coverdesk_core::PolicyCatalog;
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// The read-only policy catalog
    pub catalog: Arc<PolicyCatalog>,

    /// Server start time
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(catalog: Arc<PolicyCatalog>) -> Self {
        Self {
            catalog,
            start_time: Instant::now(),
        }
    }

    /// State backed by the built-in catalog
    pub fn builtin() -> Self {
        Self::new(Arc::new(PolicyCatalog::builtin()))
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
