//! Short-lived storage for analyses awaiting sheet generation.
//!
//! An analysis is stored under a generated id, kept for a bounded time and
//! removed once a sheet has been generated from it. Expired entries are
//! invisible to `get` even before a sweep deletes them.

use crate::error::TabsiftError;
use crate::model::Table;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A stored analysis with its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSession {
    pub id: String,
    pub table: Table,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AnalysisSession {
    pub fn new(id: &str, table: Table, ttl: Duration) -> Result<Self, TabsiftError> {
        let created_at = Utc::now();
        let expires_at = created_at.checked_add_signed(ttl).ok_or_else(|| {
            TabsiftError::SessionStore(format!("session lifetime {ttl} is out of range"))
        })?;
        Ok(AnalysisSession {
            id: id.to_string(),
            table,
            created_at,
            expires_at,
        })
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Generate a fresh analysis id of the form `analysis_<12 hex chars>`.
pub fn new_analysis_id() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string();
    format!("analysis_{}", &hex[..12])
}

/// Storage backend for analysis sessions.
pub trait SessionStore: Send + Sync {
    /// Store a table under `id`, replacing any previous entry.
    fn put(&self, id: &str, table: &Table, ttl: Duration) -> Result<(), TabsiftError>;

    /// Fetch a live table. Missing and expired ids both yield None.
    fn get(&self, id: &str) -> Result<Option<Table>, TabsiftError>;

    /// Remove an entry. Removing a missing id is not an error.
    fn delete(&self, id: &str) -> Result<(), TabsiftError>;

    /// Delete every expired entry, returning how many were removed.
    fn sweep_expired(&self) -> Result<usize, TabsiftError>;
}

/// Process-local store backed by a map.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, AnalysisSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, AnalysisSession>>, TabsiftError> {
        self.sessions
            .lock()
            .map_err(|_| TabsiftError::SessionStore("session map lock poisoned".into()))
    }
}

impl SessionStore for MemorySessionStore {
    fn put(&self, id: &str, table: &Table, ttl: Duration) -> Result<(), TabsiftError> {
        let session = AnalysisSession::new(id, table.clone(), ttl)?;
        self.lock()?.insert(id.to_string(), session);
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Table>, TabsiftError> {
        let now = Utc::now();
        Ok(self
            .lock()?
            .get(id)
            .filter(|s| !s.is_expired_at(now))
            .map(|s| s.table.clone()))
    }

    fn delete(&self, id: &str) -> Result<(), TabsiftError> {
        self.lock()?.remove(id);
        Ok(())
    }

    fn sweep_expired(&self) -> Result<usize, TabsiftError> {
        let now = Utc::now();
        let mut sessions = self.lock()?;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired_at(now));
        Ok(before - sessions.len())
    }
}

/// Store keeping one JSON document per session in a directory.
///
/// Lets separate processes (e.g. two CLI invocations) share sessions.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, TabsiftError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(FileSessionStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Option<PathBuf> {
        is_valid_id(id).then(|| self.dir.join(format!("{id}.json")))
    }

    fn read(&self, path: &Path) -> Result<Option<AnalysisSession>, TabsiftError> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let session = serde_json::from_str(&json).map_err(|e| {
                    TabsiftError::SessionStore(format!("corrupt session {}: {e}", path.display()))
                })?;
                Ok(Some(session))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn put(&self, id: &str, table: &Table, ttl: Duration) -> Result<(), TabsiftError> {
        let path = self
            .path_for(id)
            .ok_or_else(|| TabsiftError::SessionStore(format!("invalid session id '{id}'")))?;
        let session = AnalysisSession::new(id, table.clone(), ttl)?;

        // Write beside the target then rename, so readers never see half a file.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        serde_json::to_writer(&mut tmp, &session)?;
        tmp.flush()?;
        tmp.persist(&path)
            .map_err(|e| TabsiftError::SessionStore(e.to_string()))?;
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Table>, TabsiftError> {
        let Some(path) = self.path_for(id) else {
            return Ok(None);
        };
        let now = Utc::now();
        Ok(self
            .read(&path)?
            .filter(|s| !s.is_expired_at(now))
            .map(|s| s.table))
    }

    fn delete(&self, id: &str) -> Result<(), TabsiftError> {
        let Some(path) = self.path_for(id) else {
            return Ok(());
        };
        remove_if_present(&path)?;
        Ok(())
    }

    fn sweep_expired(&self) -> Result<usize, TabsiftError> {
        let now = Utc::now();
        let mut removed = 0;

        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            match self.read(&path) {
                // Another process may delete or sweep the same file first.
                Ok(Some(session)) if session.is_expired_at(now) => {
                    if remove_if_present(&path)? {
                        removed += 1;
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping unreadable session"),
            }
        }

        Ok(removed)
    }
}

/// Remove `path`, reporting whether this call deleted it.
fn remove_if_present(path: &Path) -> Result<bool, TabsiftError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
