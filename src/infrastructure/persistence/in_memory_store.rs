use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::domain::entities::alert::{Alert, AlertId, NewAlert};
use crate::domain::entities::user::User;
use crate::domain::ports::store::{AlertStore, StoreError, UserStore};

#[derive(Default)]
struct AlertTable {
    rows: BTreeMap<AlertId, Alert>,
    last_id: AlertId,
}

/// In-memory store for testing purposes.
///
/// Enforces the same constraints as the SQLite store: unique alert names and
/// admins that must be registered users.
pub struct InMemoryStore {
    users: Mutex<BTreeSet<String>>,
    alerts: Mutex<AlertTable>,
    fail_writes: AtomicBool,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: Mutex::new(BTreeSet::new()),
            alerts: Mutex::new(AlertTable::default()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent alert write fail with `StoreError::WriteFailed`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteFailed("injected write failure".into()));
        }
        Ok(())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertStore for InMemoryStore {
    fn get_alert(&self, id: AlertId) -> Result<Option<Alert>, StoreError> {
        Ok(self
            .alerts
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?
            .rows
            .get(&id)
            .cloned())
    }

    fn get_all_alerts(&self) -> Result<Vec<Alert>, StoreError> {
        Ok(self
            .alerts
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?
            .rows
            .values()
            .cloned()
            .collect())
    }

    fn get_admined_alerts(&self, user_name: &str) -> Result<Vec<Alert>, StoreError> {
        Ok(self
            .alerts
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?
            .rows
            .values()
            .filter(|a| a.is_admin(user_name))
            .cloned()
            .collect())
    }

    fn is_alert_duplicated(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self
            .alerts
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?
            .rows
            .values()
            .any(|a| a.name == name))
    }

    fn insert_alert(&self, alert: NewAlert) -> Result<Alert, StoreError> {
        self.check_writable()?;

        // Lock order: users, then alerts.
        let users = self
            .users
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?;
        if let Some(unknown) = alert.admins.iter().find(|a| !users.contains(*a)) {
            return Err(StoreError::WriteFailed(format!("unknown admin user {unknown}")));
        }

        let mut table = self
            .alerts
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?;
        drop(users);

        if table.rows.values().any(|a| a.name == alert.name) {
            return Err(StoreError::Duplicate(format!("alert name {}", alert.name)));
        }

        table.last_id += 1;
        let stored = alert.into_alert(table.last_id);
        table.rows.insert(stored.id, stored.clone());
        drop(table);
        Ok(stored)
    }

    fn save_alert(&self, alert: &Alert) -> Result<(), StoreError> {
        self.check_writable()?;

        let mut table = self
            .alerts
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?;
        let existing = table
            .rows
            .get_mut(&alert.id)
            .ok_or_else(|| StoreError::NotFound(format!("alert {}", alert.id)))?;
        existing.enabled = alert.enabled;
        drop(table);
        Ok(())
    }

    fn delete_alert(&self, id: AlertId) -> Result<bool, StoreError> {
        self.check_writable()?;

        let removed = self
            .alerts
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?
            .rows
            .remove(&id)
            .is_some();
        Ok(removed)
    }
}

impl UserStore for InMemoryStore {
    fn get_user(&self, name: &str) -> Result<Option<User>, StoreError> {
        let known = self
            .users
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?
            .contains(name);
        if !known {
            return Ok(None);
        }

        let admined_alerts = self
            .alerts
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?
            .rows
            .values()
            .filter(|a| a.is_admin(name))
            .map(|a| a.id)
            .collect();

        Ok(Some(User {
            name: name.to_string(),
            admined_alerts,
        }))
    }

    fn save_user(&self, name: &str) -> Result<(), StoreError> {
        self.users
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?
            .insert(name.to_string());
        Ok(())
    }
}
