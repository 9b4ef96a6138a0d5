use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::alert::Alert;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("monitoring backend unavailable: {0}")]
    Unavailable(String),
    #[error("monitoring backend rejected alert (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("synchronizer misconfigured: {0}")]
    Misconfigured(String),
}

/// Pushes an alert's current state to the external monitoring backend.
#[async_trait]
pub trait AlertSynchronizer: Send + Sync {
    /// Make the backend reflect the given alert. One attempt, no retry.
    ///
    /// # Errors
    ///
    /// Returns `SyncError` if the backend cannot be reached or refuses the update.
    async fn synchronize(&self, alert: &Alert) -> Result<(), SyncError>;
}
