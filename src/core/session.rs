//! # Session Persistence
//!
//! Save/load session state to `~/.shorthand/sessions/`.
//!
//! Each session is a JSON file (`<uuid>.json`). Loading hands back an owned
//! `SessionState`, so two sessions never share mutable state.
//!
//! All writes use atomic rename (write `.tmp`, then `rename()`) for crash safety.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;

use crate::core::state::{SessionDefaults, SessionState};

/// Summary used by session listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMeta {
    pub id: String,
    pub updated_at: i64,
    pub platform: String,
    pub page: String,
}

pub struct SessionStore {
    dir: PathBuf,
}

/// Returns `~/.shorthand/sessions/`.
pub fn default_sessions_dir() -> io::Result<PathBuf> {
    let dir = crate::core::config::app_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
    Ok(dir.join("sessions"))
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Session ids are uuids; anything else could escape the sessions directory.
fn validate_id(id: &str) -> io::Result<()> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, format!("invalid session id: {id}")))
}

impl SessionStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn open_default() -> io::Result<Self> {
        Self::open(default_sessions_dir()?)
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// A new, initialized session. Not written until `save`.
    pub fn create(&self, defaults: &SessionDefaults) -> SessionState {
        let mut session = SessionState::new();
        session.initialize(defaults);
        debug!("Created session {}", session.id);
        session
    }

    pub fn save(&self, session: &SessionState) -> io::Result<()> {
        validate_id(&session.id)?;
        atomic_write_json(&self.path_for(&session.id), session)?;
        debug!("Session saved: {}", session.id);
        Ok(())
    }

    pub fn load(&self, id: &str) -> io::Result<SessionState> {
        validate_id(id)?;
        let json = fs::read_to_string(self.path_for(id))?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Loads `id` if given and readable, otherwise creates a fresh session.
    /// Either way the result is initialized with `defaults`.
    pub fn load_or_create(&self, id: Option<&str>, defaults: &SessionDefaults) -> SessionState {
        if let Some(id) = id {
            match self.load(id) {
                Ok(mut session) => {
                    session.initialize(defaults);
                    return session;
                }
                Err(e) => warn!("Failed to load session {}: {}", id, e),
            }
        }
        self.create(defaults)
    }

    pub fn delete(&self, id: &str) -> io::Result<()> {
        validate_id(id)?;
        let path = self.path_for(id);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// All readable sessions, most recently updated first. Corrupt files are skipped.
    pub fn list(&self) -> io::Result<Vec<SessionMeta>> {
        let mut metas = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let parsed = fs::read_to_string(&path)
                .ok()
                .and_then(|json| serde_json::from_str::<SessionState>(&json).ok());
            match parsed {
                Some(session) => metas.push(SessionMeta {
                    id: session.id.clone(),
                    updated_at: session.updated_at,
                    platform: session.current_platform().to_string(),
                    page: session.current_page().to_string(),
                }),
                None => warn!("Skipping unreadable session file {}", path.display()),
            }
        }
        metas.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(metas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("sessions")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_save_and_load_preserves_values() {
        let (_dir, store) = store();
        let mut session = store.create(&SessionDefaults::default());
        session.select_page("Dashboard").unwrap();
        store.save(&session).unwrap();

        let loaded = store.load(&session.id).unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.current_page(), "Dashboard");
    }

    #[test]
    fn test_sessions_are_isolated() {
        let (_dir, store) = store();
        let defaults = SessionDefaults::default();
        let mut a = store.create(&defaults);
        let b = store.create(&defaults);
        a.select_platform("Reddit").unwrap();
        store.save(&a).unwrap();
        store.save(&b).unwrap();

        assert_eq!(store.load(&a.id).unwrap().current_platform(), "Reddit");
        assert_eq!(store.load(&b.id).unwrap().current_platform(), "Home");
    }

    #[test]
    fn test_load_or_create_keeps_saved_selection() {
        let (_dir, store) = store();
        let mut session = store.create(&SessionDefaults::default());
        session.select_page("Session").unwrap();
        store.save(&session).unwrap();

        let restored = store.load_or_create(Some(&session.id), &SessionDefaults::default());
        assert_eq!(restored.id, session.id);
        assert_eq!(restored.current_page(), "Session");
    }

    #[test]
    fn test_load_or_create_falls_back_to_fresh_session() {
        let (_dir, store) = store();
        let missing = uuid::Uuid::new_v4().to_string();
        let session = store.load_or_create(Some(&missing), &SessionDefaults::default());
        assert_ne!(session.id, missing);
        assert_eq!(session.current_page(), "Case Search");
    }

    #[test]
    fn test_invalid_id_is_rejected() {
        let (_dir, store) = store();
        let err = store.load("../config").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_list_sorts_and_skips_corrupt_files() {
        let (dir, store) = store();
        let defaults = SessionDefaults::default();
        let mut older = store.create(&defaults);
        older.updated_at = 100;
        let mut newer = store.create(&defaults);
        newer.updated_at = 200;
        store.save(&older).unwrap();
        store.save(&newer).unwrap();
        fs::write(dir.path().join("sessions").join("junk.json"), "{").unwrap();

        let metas = store.list().unwrap();
        assert_eq!(metas.len(), 2);
        assert_eq!(metas[0].id, newer.id);
        assert_eq!(metas[1].id, older.id);
    }

    #[test]
    fn test_delete_removes_file() {
        let (_dir, store) = store();
        let session = store.create(&SessionDefaults::default());
        store.save(&session).unwrap();
        store.delete(&session.id).unwrap();
        assert!(store.load(&session.id).is_err());
        // Deleting twice is fine.
        store.delete(&session.id).unwrap();
    }
}
