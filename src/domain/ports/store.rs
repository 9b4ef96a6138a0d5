use thiserror::Error;

use crate::domain::entities::alert::{Alert, AlertId, NewAlert};
use crate::domain::entities::user::User;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage read failed: {0}")]
    ReadFailed(String),
    #[error("storage write failed: {0}")]
    WriteFailed(String),
    #[error("entry not found: {0}")]
    NotFound(String),
    #[error("duplicate entry: {0}")]
    Duplicate(String),
}

pub trait AlertStore: Send + Sync {
    /// Fetch one alert by id, admins included.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn get_alert(&self, id: AlertId) -> Result<Option<Alert>, StoreError>;

    /// Retrieve every stored alert, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn get_all_alerts(&self) -> Result<Vec<Alert>, StoreError>;

    /// Retrieve the alerts listing `user_name` among their admins, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn get_admined_alerts(&self, user_name: &str) -> Result<Vec<Alert>, StoreError>;

    /// Whether an alert with exactly this name exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn is_alert_duplicated(&self, name: &str) -> Result<bool, StoreError>;

    /// Insert a new alert if no alert carries the same name, assigning its id.
    ///
    /// The name check and the insert happen atomically.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Duplicate` if the name is taken, or another
    /// `StoreError` if the write operation fails.
    fn insert_alert(&self, alert: NewAlert) -> Result<Alert, StoreError>;

    /// Persist the mutable fields of an existing alert.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the alert does not exist, or another
    /// `StoreError` if the write operation fails.
    fn save_alert(&self, alert: &Alert) -> Result<(), StoreError>;

    /// Remove an alert. Returns `false` when there was nothing to remove.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write operation fails.
    fn delete_alert(&self, id: AlertId) -> Result<bool, StoreError>;
}

pub trait UserStore: Send + Sync {
    /// Fetch a user and the ids of the alerts it administers.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the read operation fails.
    fn get_user(&self, name: &str) -> Result<Option<User>, StoreError>;

    /// Register a user. Registering an existing user is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write operation fails.
    fn save_user(&self, name: &str) -> Result<(), StoreError>;
}
