use std::sync::Arc;

use crate::application::error::AlertError;
use crate::domain::entities::alert::{Alert, AlertId};
use crate::domain::entities::user::User;
use crate::domain::ports::store::{AlertStore, UserStore};
use crate::domain::value_objects::principal::Principal;

/// Outcome of a successful authorization: who is acting and on what.
#[derive(Debug, Clone)]
pub struct Authorized {
    pub user: User,
    pub alert: Alert,
}

/// Decides whether a principal may mutate an alert.
///
/// Only the configured superuser and the alert's listed admins pass. The gate
/// reads from the stores and never writes.
pub struct AuthorizationGate {
    superuser: Option<String>,
    users: Arc<dyn UserStore>,
    alerts: Arc<dyn AlertStore>,
}

impl AuthorizationGate {
    #[must_use]
    pub fn new(
        superuser: Option<String>,
        users: Arc<dyn UserStore>,
        alerts: Arc<dyn AlertStore>,
    ) -> Self {
        Self {
            superuser,
            users,
            alerts,
        }
    }

    #[must_use]
    pub fn is_superuser(&self, principal: &Principal) -> bool {
        self.superuser.as_deref() == Some(principal.name())
    }

    /// Map a principal to its user record.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::Unauthenticated` if there is no principal or no user
    /// record for it, `AlertError::Persistence` if the lookup itself fails.
    pub fn resolve_user(&self, principal: Option<&Principal>) -> Result<User, AlertError> {
        let principal = principal.ok_or(AlertError::Unauthenticated)?;
        self.users
            .get_user(principal.name())?
            .ok_or_else(|| {
                tracing::warn!(principal = %principal, "principal has no user record");
                AlertError::Unauthenticated
            })
    }

    /// Check that `principal` may mutate alert `alert_id`.
    ///
    /// # Errors
    ///
    /// Returns `AlertError::Unauthenticated` if the principal cannot be resolved,
    /// `AlertError::NotFound` if the alert does not exist, `AlertError::Forbidden`
    /// if the principal is neither superuser nor admin of the alert, and
    /// `AlertError::Persistence` if a lookup fails.
    pub fn authorize(
        &self,
        principal: Option<&Principal>,
        alert_id: AlertId,
    ) -> Result<Authorized, AlertError> {
        let user = self.resolve_user(principal)?;
        let alert = self
            .alerts
            .get_alert(alert_id)?
            .ok_or(AlertError::NotFound(alert_id))?;

        let superuser = self.superuser.as_deref() == Some(user.name.as_str());
        if superuser || alert.is_admin(&user.name) {
            return Ok(Authorized { user, alert });
        }

        tracing::warn!(principal = %user.name, alert_id, "alert mutation forbidden");
        Err(AlertError::Forbidden {
            principal: user.name,
            alert_id,
        })
    }
}
