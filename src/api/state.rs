//! Shared state of the Work Hours Engine API.

use std::sync::Arc;

use crate::config::{ConfigLoader, ScheduleConfig};

/// Shared application state.
///
/// The schedule is loaded once at startup and shared read-only by every
/// request handler.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the loaded schedule.
    pub fn schedule(&self) -> &ScheduleConfig {
        self.config.schedule()
    }
}
