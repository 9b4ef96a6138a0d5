use std::path::PathBuf;
use std::sync::Mutex;

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use crate::domain::entities::alert::{Alert, AlertId, NewAlert};
use crate::domain::entities::user::User;
use crate::domain::ports::store::{AlertStore, StoreError, UserStore};

use super::migrations;

/// SQLite-backed persistent store for alerts and users.
///
/// All access goes through a single connection behind a mutex, so writes to the
/// same alert never interleave.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Create a new `SQLite` store at the given path.
    ///
    /// Expands `~`, creates parent directories, opens connection,
    /// sets WAL mode and pragmas, and initializes schema.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WriteFailed` if the database cannot be opened or initialized.
    pub fn new(path: &str) -> Result<Self, StoreError> {
        let expanded = shellexpand::tilde(path);
        let db_path = PathBuf::from(expanded.as_ref());

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        }

        let conn =
            Connection::open(&db_path).map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        Self::from_connection(conn)
    }

    /// Open a throwaway store that lives only as long as the value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WriteFailed` if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        conn.pragma_update(None, "busy_timeout", 5000)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        migrations::initialize_schema(&conn).map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == ErrorCode::ConstraintViolation
                && e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn load_admins(conn: &Connection, alert_id: AlertId) -> Result<Vec<String>, rusqlite::Error> {
    let mut stmt = conn.prepare_cached(
        "SELECT user_name FROM alert_admins WHERE alert_id = ?1 ORDER BY position",
    )?;
    let admins = stmt
        .query_map(params![alert_id], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(admins)
}

/// Run an alert query whose rows are `(id, name, enabled)` and attach admins.
fn query_alerts<P: rusqlite::Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<Alert>, rusqlite::Error> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, |row| {
            Ok((
                row.get::<_, AlertId>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, bool>(2)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(id, name, enabled)| -> Result<Alert, rusqlite::Error> {
            Ok(Alert {
                id,
                name,
                enabled,
                admins: load_admins(conn, id)?,
            })
        })
        .collect()
}

impl AlertStore for SqliteStore {
    fn get_alert(&self, id: AlertId) -> Result<Option<Alert>, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?;

        let alerts = query_alerts(
            &conn,
            "SELECT id, name, enabled FROM alerts WHERE id = ?1",
            params![id],
        )
        .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        drop(conn);
        Ok(alerts.into_iter().next())
    }

    fn get_all_alerts(&self) -> Result<Vec<Alert>, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?;

        let alerts = query_alerts(&conn, "SELECT id, name, enabled FROM alerts ORDER BY id", [])
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        drop(conn);
        Ok(alerts)
    }

    fn get_admined_alerts(&self, user_name: &str) -> Result<Vec<Alert>, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?;

        let alerts = query_alerts(
            &conn,
            "SELECT a.id, a.name, a.enabled FROM alerts a \
             JOIN alert_admins aa ON aa.alert_id = a.id \
             WHERE aa.user_name = ?1 ORDER BY a.id",
            params![user_name],
        )
        .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        drop(conn);
        Ok(alerts)
    }

    fn is_alert_duplicated(&self, name: &str) -> Result<bool, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?;

        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM alerts WHERE name = ?1)",
                params![name],
                |row| row.get(0),
            )
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        drop(conn);
        Ok(exists)
    }

    fn insert_alert(&self, alert: NewAlert) -> Result<Alert, StoreError> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?;

        let tx = conn
            .transaction()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        tx.execute(
            "INSERT INTO alerts (name, enabled) VALUES (?1, ?2)",
            params![alert.name, alert.enabled],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::Duplicate(format!("alert name {}", alert.name))
            } else {
                StoreError::WriteFailed(e.to_string())
            }
        })?;
        let id = tx.last_insert_rowid();

        for (position, admin) in alert.admins.iter().enumerate() {
            let position =
                i64::try_from(position).map_err(|e| StoreError::WriteFailed(e.to_string()))?;
            tx.execute(
                "INSERT INTO alert_admins (alert_id, user_name, position) VALUES (?1, ?2, ?3)",
                params![id, admin, position],
            )
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        }

        tx.commit()
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        drop(conn);
        Ok(alert.into_alert(id))
    }

    fn save_alert(&self, alert: &Alert) -> Result<(), StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?;

        let changed = conn
            .execute(
                "UPDATE alerts SET enabled = ?1 WHERE id = ?2",
                params![alert.enabled, alert.id],
            )
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        drop(conn);
        if changed == 0 {
            return Err(StoreError::NotFound(format!("alert {}", alert.id)));
        }
        Ok(())
    }

    fn delete_alert(&self, id: AlertId) -> Result<bool, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?;

        let removed = conn
            .execute("DELETE FROM alerts WHERE id = ?1", params![id])
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        drop(conn);
        Ok(removed > 0)
    }
}

impl UserStore for SqliteStore {
    fn get_user(&self, name: &str) -> Result<Option<User>, StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::ReadFailed("lock poisoned".into()))?;

        let found: Option<String> = conn
            .query_row(
                "SELECT name FROM users WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        let Some(name) = found else {
            return Ok(None);
        };

        let mut stmt = conn
            .prepare(
                "SELECT alert_id FROM alert_admins WHERE user_name = ?1 ORDER BY alert_id",
            )
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        let admined_alerts = stmt
            .query_map(params![name], |row| row.get::<_, AlertId>(0))
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;

        drop(stmt);
        drop(conn);
        Ok(Some(User {
            name,
            admined_alerts,
        }))
    }

    fn save_user(&self, name: &str) -> Result<(), StoreError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::WriteFailed("lock poisoned".into()))?;

        conn.execute(
            "INSERT OR IGNORE INTO users (name) VALUES (?1)",
            params![name],
        )
        .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        drop(conn);
        Ok(())
    }
}
