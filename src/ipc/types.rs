use std::path::{Path, PathBuf};

use rusqlite::Connection;
use serde::Deserialize;

use crate::catalog;
use crate::db::{self, StorageUnavailable};
use crate::model::{AppSnapshot, Major};

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub db: Option<Connection>,
    pub snapshot: AppSnapshot,
    /// Which major the host is looking at. Never persisted.
    pub active_major: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            workspace: None,
            db: None,
            snapshot: catalog::default_snapshot(),
            active_major: 0,
        }
    }

    pub fn storage_mode(&self) -> &'static str {
        if self.db.is_some() {
            "sqlite"
        } else {
            "memory"
        }
    }

    pub fn active_major(&self) -> Option<&Major> {
        self.snapshot
            .majors
            .get(self.active_major)
            .map(|m| m.as_ref())
    }

    /// Opens the store under `path` and loads its snapshot. An empty store is
    /// seeded from the in-memory snapshot when no store was open, otherwise
    /// from the default dataset. On failure the current snapshot is kept and
    /// the state runs without a store.
    pub fn open_workspace(&mut self, path: &Path) -> Result<(), StorageUnavailable> {
        let was_in_memory = self.db.is_none();
        self.workspace = Some(path.to_path_buf());
        self.db = None;
        let conn = db::open_db(path)?;
        match db::load_snapshot(&conn)? {
            Some(snapshot) => self.snapshot = snapshot,
            None => {
                if !was_in_memory {
                    self.snapshot = catalog::default_snapshot();
                }
                db::save_snapshot(&conn, &self.snapshot)?;
            }
        }
        if self.active_major >= self.snapshot.majors.len() {
            self.active_major = 0;
        }
        self.db = Some(conn);
        tracing::info!(workspace = %path.display(), "workspace opened");
        Ok(())
    }

    /// Replaces the snapshot and writes it through to the store.
    pub fn commit(&mut self, next: AppSnapshot) {
        self.snapshot = next;
        if self.active_major >= self.snapshot.majors.len() {
            self.active_major = 0;
        }
        self.persist();
    }

    fn persist(&mut self) {
        let Some(conn) = self.db.as_ref() else {
            return;
        };
        if let Err(e) = db::save_snapshot(conn, &self.snapshot) {
            tracing::warn!(error = %e, "write failed; continuing in memory");
            self.db = None;
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
