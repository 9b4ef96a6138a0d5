use rusqlite::Connection;

/// Initialize the database schema, creating tables if they don't exist.
///
/// Alert names are unique at the schema level; this constraint is what keeps
/// concurrent creates from both succeeding with the same name.
///
/// # Errors
/// Returns `rusqlite::Error` if any SQL statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            name        TEXT    PRIMARY KEY NOT NULL
        );

        CREATE TABLE IF NOT EXISTS alerts (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT    NOT NULL UNIQUE,
            enabled     INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS alert_admins (
            alert_id    INTEGER NOT NULL REFERENCES alerts(id) ON DELETE CASCADE,
            user_name   TEXT    NOT NULL REFERENCES users(name),
            position    INTEGER NOT NULL,
            PRIMARY KEY (alert_id, user_name)
        );

        CREATE INDEX IF NOT EXISTS idx_alert_admins_user ON alert_admins(user_name);",
    )?;
    Ok(())
}
