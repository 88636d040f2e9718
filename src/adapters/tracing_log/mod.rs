// Tracing log adapter - Forwards interactor messages to tracing

use crate::ports::*;
use async_trait::async_trait;
use tracing::{debug, error, info, warn};

/// Tracing log adapter
///
/// The subscriber is installed once in `main`; this adapter only emits events
/// tagged with the component that owns it.
pub struct TracingLogAdapter {
    component: &'static str,
}

impl TracingLogAdapter {
    /// Create new tracing log adapter
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl Default for TracingLogAdapter {
    fn default() -> Self {
        Self::new("framex")
    }
}

#[async_trait]
impl LogPort for TracingLogAdapter {
    async fn info(&self, message: &str) {
        info!(component = self.component, "{}", message);
    }

    async fn warn(&self, message: &str) {
        warn!(component = self.component, "{}", message);
    }

    async fn error(&self, message: &str) {
        error!(component = self.component, "{}", message);
    }

    async fn debug(&self, message: &str) {
        debug!(component = self.component, "{}", message);
    }
}
