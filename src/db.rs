use crate::catalog;
use crate::model::AppSnapshot;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

pub const DB_FILE: &str = "degreetrack.sqlite3";
pub const SNAPSHOT_KEY: &str = "degree-tracker-data";
const SCHEMA_VERSION: i64 = 1;

#[derive(Debug, thiserror::Error)]
#[error("storage unavailable: {reason}")]
pub struct StorageUnavailable {
    pub reason: String,
}

impl From<rusqlite::Error> for StorageUnavailable {
    fn from(e: rusqlite::Error) -> Self {
        Self {
            reason: e.to_string(),
        }
    }
}

impl From<std::io::Error> for StorageUnavailable {
    fn from(e: std::io::Error) -> Self {
        Self {
            reason: e.to_string(),
        }
    }
}

pub fn open_db(workspace: &Path) -> Result<Connection, StorageUnavailable> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join(DB_FILE);
    let conn = Connection::open(db_path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv(
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT
        )",
        [],
    )?;
    ensure_schema_version(&conn)?;
    Ok(conn)
}

fn ensure_schema_version(conn: &Connection) -> Result<(), StorageUnavailable> {
    let current: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    if current < SCHEMA_VERSION {
        conn.execute_batch(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))?;
    }
    Ok(())
}

pub fn kv_get(conn: &Connection, key: &str) -> Result<Option<String>, StorageUnavailable> {
    let value = conn
        .query_row("SELECT value FROM kv WHERE key = ?", [key], |r| r.get(0))
        .optional()?;
    Ok(value)
}

pub fn kv_set(conn: &Connection, key: &str, value: &str) -> Result<(), StorageUnavailable> {
    conn.execute(
        "INSERT INTO kv(key, value, updated_at)
         VALUES(?, ?, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET
           value = excluded.value,
           updated_at = excluded.updated_at",
        params![key, value],
    )?;
    Ok(())
}

/// Reads the stored snapshot. A missing or unparsable entry is `Ok(None)` so
/// the caller falls back to the built-in dataset.
pub fn load_snapshot(conn: &Connection) -> Result<Option<AppSnapshot>, StorageUnavailable> {
    let Some(raw) = kv_get(conn, SNAPSHOT_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_str::<AppSnapshot>(&raw) {
        Ok(mut snapshot) => {
            catalog::attach_legacy_schemes(&mut snapshot);
            Ok(Some(snapshot))
        }
        Err(e) => {
            tracing::warn!(error = %e, "stored snapshot is unparsable; using defaults");
            Ok(None)
        }
    }
}

pub fn save_snapshot(conn: &Connection, snapshot: &AppSnapshot) -> Result<(), StorageUnavailable> {
    let text = serde_json::to_string(snapshot).map_err(|e| StorageUnavailable {
        reason: format!("failed to serialize snapshot: {e}"),
    })?;
    kv_set(conn, SNAPSHOT_KEY, &text)
}
