//! Durable session storage backends.
//!
//! The session is persisted as a single named JSON blob so it survives
//! process restarts. The storage backend is a trait seam: the file store
//! mirrors what the backend contract calls durable key-value storage, the
//! keyring store keeps tokens in the OS keychain instead of on disk, and
//! the in-memory store exists for tests.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use keyring::Entry;

use crate::auth::session::Session;

/// Session file name in the cache directory
const SESSION_FILE: &str = "session.json";

/// Keychain service name
const SERVICE_NAME: &str = "estateshub-client";

/// Keychain account name holding the serialized session blob
const SESSION_ENTRY: &str = "session";

pub trait SessionStore: Send + Sync {
    /// Load the persisted session, `None` if nothing is stored
    fn load(&self) -> Result<Option<Session>>;
    /// Persist the session wholesale
    fn save(&self, session: &Session) -> Result<()>;
    /// Remove the persisted session; a no-op when nothing is stored
    fn clear(&self) -> Result<()>;
}

/// Session blob stored as `session.json` under the cache directory
pub struct FileSessionStore {
    cache_dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents =
            std::fs::read_to_string(&path).context("Failed to read session file")?;
        let session: Session =
            serde_json::from_str(&contents).context("Failed to parse session file")?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<()> {
        let path = self.session_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(session)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Session blob held in the OS keychain, for callers that want tokens off
/// the filesystem
pub struct KeyringSessionStore;

impl KeyringSessionStore {
    pub fn new() -> Self {
        Self
    }

    fn entry() -> Result<Entry> {
        Entry::new(SERVICE_NAME, SESSION_ENTRY).context("Failed to create keyring entry")
    }
}

impl Default for KeyringSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for KeyringSessionStore {
    fn load(&self) -> Result<Option<Session>> {
        let entry = Self::entry()?;
        match entry.get_password() {
            Ok(blob) => {
                let session: Session = serde_json::from_str(&blob)
                    .context("Failed to parse session blob from keychain")?;
                Ok(Some(session))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to read session from keychain"),
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        let blob = serde_json::to_string(session)?;
        Self::entry()?
            .set_password(&blob)
            .context("Failed to store session in keychain")?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match Self::entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete session from keychain"),
        }
    }
}

/// In-memory store for tests; clones share the same slot
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Peek at the stored session without going through the trait
    pub fn stored(&self) -> Option<Session> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self.stored())
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> FileSessionStore {
        let dir = std::env::temp_dir().join(format!(
            "estateshub-session-test-{}",
            std::process::id()
        ));
        FileSessionStore::new(dir)
    }

    #[test]
    fn test_file_store_round_trip() {
        let store = temp_store();
        let session = Session {
            access_token: Some("a.b.c".to_string()),
            refresh_token: Some("d.e.f".to_string()),
            user: None,
            is_authenticated: true,
            token_expiry_millis: Some(1_767_225_600_000),
        };

        store.save(&session).expect("save should succeed");
        let loaded = store.load().expect("load should succeed").expect("session should exist");
        assert_eq!(loaded.access_token.as_deref(), Some("a.b.c"));
        assert_eq!(loaded.token_expiry_millis, Some(1_767_225_600_000));
        assert!(loaded.is_authenticated);

        store.clear().expect("clear should succeed");
        assert!(store.load().expect("load should succeed").is_none());
        // Clearing twice is a no-op
        store.clear().expect("second clear should succeed");
    }

    #[test]
    fn test_memory_store_shares_slot_across_clones() {
        let store = MemorySessionStore::new();
        let other = store.clone();
        store
            .save(&Session {
                access_token: Some("t".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(other.stored().is_some());
        other.clear().unwrap();
        assert!(store.stored().is_none());
    }
}
