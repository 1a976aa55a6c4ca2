//! Persisted access-token storage.
//!
//! The persisted token is the source of truth for "is there a session": the
//! transport reads it on every request and session operations write it.
//! Reads and writes are plain get/set; `clear_if` is the one compare-and-clear
//! used when a rejected request must not remove a token that replaced it.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};

use tracing::{debug, warn};

use crate::error::{ClientError, ClientResult};

/// Well-known key the access token is stored under.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Storage for the bearer token.
pub trait TokenStore: Send + Sync {
    /// Current token, if one is persisted.
    fn get(&self) -> Option<String>;

    /// Persist a new token, replacing any previous one.
    fn set(&self, token: &str) -> ClientResult<()>;

    /// Remove the persisted token. Removing a missing token is not an error.
    fn clear(&self) -> ClientResult<()>;

    /// Remove the persisted token only if it is still `expected`. Returns
    /// whether it matched.
    fn clear_if(&self, expected: &str) -> ClientResult<bool>;
}

// =============================================================================
// In-memory store
// =============================================================================

/// Token store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a token already persisted.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.read().ok().and_then(|t| t.clone())
    }

    fn set(&self, token: &str) -> ClientResult<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| ClientError::storage("token lock poisoned"))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| ClientError::storage("token lock poisoned"))?;
        *guard = None;
        Ok(())
    }

    fn clear_if(&self, expected: &str) -> ClientResult<bool> {
        let mut guard = self
            .token
            .write()
            .map_err(|_| ClientError::storage("token lock poisoned"))?;
        if guard.as_deref() != Some(expected) {
            return Ok(false);
        }
        *guard = None;
        Ok(true)
    }
}

// =============================================================================
// File-backed store
// =============================================================================

/// Token store persisted as a small JSON object on disk, durable across
/// restarts of the client.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Option<HashMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read token file");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Some(entries),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring malformed token file");
                None
            }
        }
    }

    /// Caller holds `write_lock`.
    fn remove_file(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Cleared access token");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::storage(format!(
                "remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        self.read_entries()?
            .remove(ACCESS_TOKEN_KEY)
            .filter(|t| !t.is_empty())
    }

    fn set(&self, token: &str) -> ClientResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ClientError::storage("token file lock poisoned"))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                ClientError::storage(format!("create {}: {}", parent.display(), e))
            })?;
        }

        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(ACCESS_TOKEN_KEY.to_string(), token.to_string());
        let body = serde_json::to_string_pretty(&entries)?;

        fs::write(&self.path, body)
            .map_err(|e| ClientError::storage(format!("write {}: {}", self.path.display(), e)))?;

        debug!(path = %self.path.display(), "Persisted access token");
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ClientError::storage("token file lock poisoned"))?;

        self.remove_file()
    }

    fn clear_if(&self, expected: &str) -> ClientResult<bool> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ClientError::storage("token file lock poisoned"))?;

        if self.get().as_deref() != Some(expected) {
            debug!(path = %self.path.display(), "Persisted token changed, keeping it");
            return Ok(false);
        }
        self.remove_file()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_clear() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.get(), None);
        store.set("tok").unwrap();
        assert_eq!(store.get().as_deref(), Some("tok"));
        store.clear().unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("token.json");

        FileTokenStore::new(&path).set("tok1").unwrap();
        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.get().as_deref(), Some("tok1"));

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains(ACCESS_TOKEN_KEY));
    }

    #[test]
    fn test_file_store_clear_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token.json"));
        assert!(store.clear().is_ok());
        store.set("tok").unwrap();
        store.clear().unwrap();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_clear_if_keeps_a_replaced_token() {
        let memory = MemoryTokenStore::with_token("old");
        memory.set("new").unwrap();
        assert!(!memory.clear_if("old").unwrap());
        assert_eq!(memory.get().as_deref(), Some("new"));
        assert!(memory.clear_if("new").unwrap());
        assert_eq!(memory.get(), None);

        let dir = tempfile::tempdir().unwrap();
        let file = FileTokenStore::new(dir.path().join("token.json"));
        file.set("new").unwrap();
        assert!(!file.clear_if("old").unwrap());
        assert_eq!(file.get().as_deref(), Some("new"));
        assert!(file.clear_if("new").unwrap());
        assert!(!file.path().exists());
        assert!(!file.clear_if("new").unwrap());
    }

    #[test]
    fn test_file_store_malformed_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(FileTokenStore::new(&path).get(), None);
    }
}
