use log::{info, warn};

/// Thin wrapper over the `log` facade shared by the renderer and the store.
#[derive(Debug, Clone, Default)]
pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("{}", message);
    }

    pub fn warn(&self, message: &str) {
        warn!("{}", message);
    }
}
