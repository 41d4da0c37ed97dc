//! On-disk cache for the HTTP sync client
//!
//! Two small JSON files in the data directory: the signed-in session and the
//! last sync state. Writes go through a temp file and a rename so a crash
//! never leaves a half-written file behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::client::SyncStateRecord;
use crate::config::Config;
use crate::error::ClientError;

/// Cached session identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedSession {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Session and sync state files
#[derive(Debug, Clone)]
pub struct SessionCache {
    session_path: PathBuf,
    state_path: PathBuf,
}

impl SessionCache {
    pub fn new(session_path: PathBuf, state_path: PathBuf) -> Self {
        Self {
            session_path,
            state_path,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.session_path(), config.sync_state_path())
    }

    pub fn load_session(&self) -> Result<Option<CachedSession>, ClientError> {
        read_json(&self.session_path)
    }

    pub fn save_session(&self, session: &CachedSession) -> Result<(), ClientError> {
        write_json(&self.session_path, session)
    }

    /// Forget the cached session
    pub fn clear_session(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.session_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::cache(e, &self.session_path)),
        }
    }

    pub fn load_state(&self) -> Result<Option<SyncStateRecord>, ClientError> {
        read_json(&self.state_path)
    }

    pub fn save_state(&self, state: &SyncStateRecord) -> Result<(), ClientError> {
        write_json(&self.state_path, state)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ClientError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ClientError::cache(e, path)),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| ClientError::CorruptCache {
            path: path.to_path_buf(),
            details: e.to_string(),
        })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ClientError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ClientError::cache(e, parent))?;
    }

    let json = serde_json::to_string_pretty(value).map_err(|e| ClientError::CorruptCache {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json).map_err(|e| ClientError::cache(e, &tmp_path))?;
    fs::rename(&tmp_path, path).map_err(|e| ClientError::cache(e, path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn cache(temp_dir: &TempDir) -> SessionCache {
        SessionCache::new(
            temp_dir.path().join("data").join("session.json"),
            temp_dir.path().join("data").join("sync_state.json"),
        )
    }

    #[test]
    fn test_missing_files_are_empty() {
        let temp_dir = TempDir::new().unwrap();
        let cache = cache(&temp_dir);

        assert!(cache.load_session().unwrap().is_none());
        assert!(cache.load_state().unwrap().is_none());
    }

    #[test]
    fn test_session_persists() {
        let temp_dir = TempDir::new().unwrap();
        let session = CachedSession {
            user_id: Some("u-1".to_string()),
            email: Some("ada@example.com".to_string()),
            access_token: Some("tok-1".to_string()),
        };

        cache(&temp_dir).save_session(&session).unwrap();

        // Fresh cache instance simulates a restart
        assert_eq!(cache(&temp_dir).load_session().unwrap(), Some(session));
    }

    #[test]
    fn test_clear_session() {
        let temp_dir = TempDir::new().unwrap();
        let cache = cache(&temp_dir);

        // Clearing nothing is fine
        cache.clear_session().unwrap();

        cache.save_session(&CachedSession::default()).unwrap();
        cache.clear_session().unwrap();
        assert!(cache.load_session().unwrap().is_none());
    }

    #[test]
    fn test_state_round_trip_uses_camel_case() {
        let temp_dir = TempDir::new().unwrap();
        let cache = cache(&temp_dir);
        let state = SyncStateRecord {
            phase: Some("online".to_string()),
            last_sync: Some(Utc.with_ymd_and_hms(2026, 5, 4, 8, 30, 0).unwrap()),
        };

        cache.save_state(&state).unwrap();

        let raw = fs::read_to_string(temp_dir.path().join("data/sync_state.json")).unwrap();
        assert!(raw.contains("lastSync"));
        assert_eq!(cache.load_state().unwrap(), Some(state));
    }

    #[test]
    fn test_partial_state_record() {
        let temp_dir = TempDir::new().unwrap();
        let cache = cache(&temp_dir);
        fs::create_dir_all(temp_dir.path().join("data")).unwrap();
        fs::write(temp_dir.path().join("data/sync_state.json"), "{}").unwrap();

        assert_eq!(cache.load_state().unwrap(), Some(SyncStateRecord::default()));
    }

    #[test]
    fn test_corrupt_state_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let cache = cache(&temp_dir);
        fs::create_dir_all(temp_dir.path().join("data")).unwrap();
        fs::write(temp_dir.path().join("data/sync_state.json"), "not json").unwrap();

        let err = cache.load_state().unwrap_err();
        assert!(matches!(err, ClientError::CorruptCache { .. }));
    }
}
