//! Service container for dependency injection
//!
//! Wires sessions up from settings and a clock.

use std::sync::Arc;

use crate::application::TreeSession;
use crate::config::Settings;
use crate::infrastructure::traits::{Clock, SystemClock};

/// Container holding settings and shared dependencies.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Time source for click detection
    pub clock: Arc<dyn Clock>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(SystemClock))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, clock: Arc<dyn Clock>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, clock }
    }

    /// Fresh session configured from the settings.
    pub fn session(&self) -> TreeSession {
        TreeSession::new(
            Arc::clone(&self.clock),
            self.settings.double_click_threshold(),
            self.settings.renderer(),
        )
    }
}
