use async_trait::async_trait;

use crate::domain::entities::alert::Alert;
use crate::domain::ports::synchronizer::{AlertSynchronizer, SyncError};

/// Synchronizer that accepts every push without contacting anything.
///
/// Used when no monitoring backend is configured.
pub struct NoopSynchronizer;

impl NoopSynchronizer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for NoopSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AlertSynchronizer for NoopSynchronizer {
    async fn synchronize(&self, alert: &Alert) -> Result<(), SyncError> {
        tracing::debug!(alert_id = alert.id, "no monitoring backend configured, skipping push");
        Ok(())
    }
}
