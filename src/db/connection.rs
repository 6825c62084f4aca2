use crate::error::StorageError;
use log::{debug, warn};
use rusqlite::Connection;
use std::path::Path;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    amount_cents INTEGER NOT NULL,
    category TEXT NOT NULL,
    date TEXT NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions (date);
";

/// Open the database file. Failures are logged here since every caller
/// treats them the same way.
pub fn open_connection(path: &Path) -> Result<Connection, StorageError> {
    debug!("Opening database at {}", path.display());
    Connection::open(path).map_err(|e| {
        warn!("Error connecting to database {}: {}", path.display(), e);
        StorageError::Connection(e)
    })
}

/// Create the database file and the `transactions` table if absent.
pub fn initialize(path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let conn = open_connection(path)?;
    create_schema(&conn)
}

pub fn create_schema(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

#[cfg(test)]
pub fn establish_test_connection() -> Result<Connection, StorageError> {
    let conn = Connection::open_in_memory()?;
    create_schema(&conn)?;
    Ok(conn)
}
