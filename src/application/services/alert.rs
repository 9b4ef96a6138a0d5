use std::sync::Arc;

use crate::application::error::AlertError;
use crate::domain::entities::alert::{Alert, AlertId, DetailedAlert, NewAlert};
use crate::domain::entities::user::User;
use crate::domain::ports::store::{AlertStore, StoreError, UserStore};
use crate::domain::ports::synchronizer::{AlertSynchronizer, SyncError};
use crate::domain::value_objects::principal::Principal;

use super::authorization::AuthorizationGate;

/// Result of an update that got past authorization.
///
/// A failed push does not undo the save: `SyncFailed` means the store already
/// holds the new state while the monitoring backend does not.
#[derive(Debug)]
pub enum UpdateOutcome {
    Synced(Alert),
    SyncFailed { alert: Alert, error: SyncError },
    SaveFailed(StoreError),
}

impl UpdateOutcome {
    /// The alert as persisted, if the save went through.
    #[must_use]
    pub const fn alert(&self) -> Option<&Alert> {
        match self {
            Self::Synced(alert) | Self::SyncFailed { alert, .. } => Some(alert),
            Self::SaveFailed(_) => None,
        }
    }

    /// Collapse into a plain result: success only when saved and synced.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::Persistence` for `SaveFailed` and `AlertError::Sync`
    /// for `SyncFailed`.
    pub fn into_result(self) -> Result<Alert, AlertError> {
        match self {
            Self::Synced(alert) => Ok(alert),
            Self::SyncFailed { error, .. } => Err(AlertError::Sync(error)),
            Self::SaveFailed(error) => Err(AlertError::Persistence(error)),
        }
    }
}

/// Orchestrates alert lifecycle: authorize → validate → persist → synchronize.
pub struct AlertService {
    alerts: Arc<dyn AlertStore>,
    users: Arc<dyn UserStore>,
    synchronizer: Arc<dyn AlertSynchronizer>,
    gate: AuthorizationGate,
}

impl AlertService {
    #[must_use]
    pub fn new(
        alerts: Arc<dyn AlertStore>,
        users: Arc<dyn UserStore>,
        synchronizer: Arc<dyn AlertSynchronizer>,
        superuser: Option<String>,
    ) -> Self {
        let gate = AuthorizationGate::new(superuser, Arc::clone(&users), Arc::clone(&alerts));
        Self {
            alerts,
            users,
            synchronizer,
            gate,
        }
    }

    /// Create an alert administered by the calling principal.
    ///
    /// The new alert is not pushed to the monitoring backend; that happens on
    /// its first update.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for an empty name, `Unauthenticated` if the
    /// principal cannot be resolved, `Conflict` if the name is taken, and
    /// `Persistence` if the store fails.
    pub fn create_alert(
        &self,
        principal: Option<&Principal>,
        name: &str,
        enabled: bool,
    ) -> Result<Alert, AlertError> {
        if name.is_empty() {
            return Err(AlertError::InvalidArgument("alert name is empty".into()));
        }

        let user = self.gate.resolve_user(principal)?;

        // Fast path for a friendly error; the store's uniqueness guard is authoritative.
        if self.is_alert_duplicated(name)? {
            return Err(AlertError::Conflict(name.to_string()));
        }

        let alert = self.alerts.insert_alert(NewAlert {
            name: name.to_string(),
            enabled,
            admins: vec![user.name.clone()],
        })?;

        tracing::info!(alert_id = alert.id, name = %alert.name, admin = %user.name, "alert created");
        Ok(alert)
    }

    /// Set an alert's `enabled` flag, persist it, then push it to the backend.
    ///
    /// The push happens on every successful save, even when the flag did not
    /// change, so repeating an update retries a failed synchronization.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated`, `Forbidden`, `NotFound` or `Persistence` when
    /// the update is refused before anything is written. Save and sync failures
    /// are reported through the returned [`UpdateOutcome`].
    pub async fn update_alert(
        &self,
        principal: Option<&Principal>,
        id: AlertId,
        enabled: bool,
    ) -> Result<UpdateOutcome, AlertError> {
        let mut alert = self.gate.authorize(principal, id)?.alert;
        alert.enabled = enabled;

        if let Err(e) = self.alerts.save_alert(&alert) {
            tracing::warn!(alert_id = id, "saving alert failed: {e}");
            return Ok(UpdateOutcome::SaveFailed(e));
        }

        match self.synchronizer.synchronize(&alert).await {
            Ok(()) => {
                tracing::info!(alert_id = id, enabled, "alert updated and synchronized");
                Ok(UpdateOutcome::Synced(alert))
            }
            Err(error) => {
                tracing::warn!(alert_id = id, enabled, "alert saved but synchronization failed: {error}");
                Ok(UpdateOutcome::SyncFailed { alert, error })
            }
        }
    }

    /// Fetch an alert by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, `Persistence` if the read fails.
    pub fn get_alert(&self, id: AlertId) -> Result<Alert, AlertError> {
        self.alerts.get_alert(id)?.ok_or(AlertError::NotFound(id))
    }

    /// Fetch an alert with its admin user records resolved.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, `Persistence` if a read fails.
    pub fn get_detailed_alert(&self, id: AlertId) -> Result<DetailedAlert, AlertError> {
        let alert = self.get_alert(id)?;
        let admins = alert
            .admins
            .iter()
            .map(|name| {
                self.users
                    .get_user(name)
                    .map(|u| u.unwrap_or_else(|| User::new(name.clone())))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DetailedAlert {
            id: alert.id,
            name: alert.name,
            enabled: alert.enabled,
            admins,
        })
    }

    /// List the alerts visible to `principal`.
    ///
    /// The superuser sees every alert, anyone else exactly the alerts they
    /// administer. Without a resolvable principal the list is empty.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if a read fails.
    pub fn list_alerts(&self, principal: Option<&Principal>) -> Result<Vec<Alert>, AlertError> {
        let Some(principal) = principal else {
            return Ok(Vec::new());
        };

        if self.gate.is_superuser(principal) {
            return Ok(self.alerts.get_all_alerts()?);
        }

        if self.users.get_user(principal.name())?.is_none() {
            return Ok(Vec::new());
        }
        Ok(self.alerts.get_admined_alerts(principal.name())?)
    }

    /// Delete an alert. Returns `false` if there was nothing to delete.
    ///
    /// Deleting an absent id is a no-op for any authenticated principal. The
    /// monitoring backend is not contacted.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated`, `Forbidden` or `Persistence`.
    pub fn delete_alert(&self, principal: Option<&Principal>, id: AlertId) -> Result<bool, AlertError> {
        match self.gate.authorize(principal, id) {
            Ok(_) => {}
            Err(AlertError::NotFound(_)) => {
                tracing::debug!(alert_id = id, "delete of absent alert ignored");
                return Ok(false);
            }
            Err(e) => return Err(e),
        }

        let removed = self.alerts.delete_alert(id)?;
        if removed {
            tracing::info!(alert_id = id, "alert deleted");
        }
        Ok(removed)
    }

    /// Resolve the calling principal to its user record.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` if there is no principal or no user record,
    /// `Persistence` if the lookup fails.
    pub fn authenticate(&self, principal: Option<&Principal>) -> Result<User, AlertError> {
        self.gate.resolve_user(principal)
    }

    /// Whether an alert with exactly this name exists.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the read fails.
    pub fn is_alert_duplicated(&self, name: &str) -> Result<bool, AlertError> {
        Ok(self.alerts.is_alert_duplicated(name)?)
    }

    /// Register a user so it can act as a principal.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a blank or whitespace-padded name,
    /// `Persistence` if the write fails.
    pub fn register_user(&self, name: &str) -> Result<User, AlertError> {
        let principal = Principal::new(name)
            .ok_or_else(|| AlertError::InvalidArgument("user name is blank or padded".into()))?;
        self.users.save_user(principal.name())?;
        self.gate.resolve_user(Some(&principal))
    }
}
