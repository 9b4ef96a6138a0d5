use thiserror::Error;

use crate::domain::entities::alert::AlertId;
use crate::domain::ports::store::StoreError;
use crate::domain::ports::synchronizer::SyncError;

/// Failures surfaced by the alert service to its callers.
#[derive(Error, Debug)]
pub enum AlertError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("authentication required")]
    Unauthenticated,
    #[error("{principal} may not modify alert {alert_id}")]
    Forbidden { principal: String, alert_id: AlertId },
    #[error("alert name already in use: {0}")]
    Conflict(String),
    #[error("alert {0} not found")]
    NotFound(AlertId),
    #[error("persistence failed: {0}")]
    Persistence(#[source] StoreError),
    #[error("synchronization failed: {0}")]
    Sync(#[source] SyncError),
}

impl From<StoreError> for AlertError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(name) => Self::Conflict(name),
            other => Self::Persistence(other),
        }
    }
}
