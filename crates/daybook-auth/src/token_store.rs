//! Persistence of the session tokens and cached profile.
//!
//! Two backends: a JSON file under `~/.daybook/` (mode 0600) and the OS
//! keychain, which falls back to the file when the keychain is unavailable.
//! [`MemoryStore`] keeps everything in process.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use daybook_core::identity::User;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "daybook-cli";
const KEYRING_USER: &str = "session";
const CREDENTIALS_FILE_NAME: &str = "credentials.json";

/// What survives between runs: both tokens and the last known profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub user: Option<User>,
}

impl StoredSession {
    /// Both tokens are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.access_token.trim().is_empty() && !self.refresh_token.trim().is_empty()
    }
}

pub trait TokenStore: Send {
    /// # Errors
    ///
    /// [`AuthError::TokenStore`] when the backing storage cannot be read.
    fn load(&self) -> Result<Option<StoredSession>, AuthError>;

    /// # Errors
    ///
    /// [`AuthError::TokenStore`] when the backing storage cannot be written.
    fn save(&self, session: &StoredSession) -> Result<(), AuthError>;

    /// Remove everything. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// [`AuthError::TokenStore`] when stored data cannot be removed.
    fn clear(&self) -> Result<(), AuthError>;

    /// Short name for status display.
    fn source(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `~/.daybook/credentials.json`.
    ///
    /// # Errors
    ///
    /// [`AuthError::TokenStore`] when the home directory cannot be found.
    pub fn default_location() -> Result<Self, AuthError> {
        dirs::home_dir()
            .map(|home| Self::new(home.join(".daybook").join(CREDENTIALS_FILE_NAME)))
            .ok_or_else(|| {
                AuthError::TokenStore("home directory not found; cannot store credentials".into())
            })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileStore {
    fn load(&self) -> Result<Option<StoredSession>, AuthError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(AuthError::TokenStore(format!(
                    "read {}: {error}",
                    self.path.display()
                )));
            }
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&raw).map(Some).map_err(|error| {
            AuthError::TokenStore(format!("parse {}: {error}", self.path.display()))
        })
    }

    fn save(&self, session: &StoredSession) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStore(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| AuthError::TokenStore(format!("serialize session: {e}")))?;
        fs::write(&self.path, json)
            .map_err(|e| AuthError::TokenStore(format!("write {}: {e}", self.path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStore(format!("chmod {}: {e}", self.path.display()))
            })?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(AuthError::TokenStore(format!(
                "delete {}: {error}",
                self.path.display()
            ))),
        }
    }

    fn source(&self) -> &'static str {
        "file"
    }
}

// ---------------------------------------------------------------------------
// KeyringStore
// ---------------------------------------------------------------------------

/// OS keychain storage with a file fallback.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
    fallback: FileStore,
}

impl KeyringStore {
    /// Uses the `daybook-cli` service, or `DAYBOOK_KEYRING_SERVICE` when set.
    #[must_use]
    pub fn new(fallback: FileStore) -> Self {
        let service = std::env::var("DAYBOOK_KEYRING_SERVICE")
            .unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string());
        Self { service, fallback }
    }

    fn entry(&self) -> Option<keyring::Entry> {
        match keyring::Entry::new(&self.service, KEYRING_USER) {
            Ok(entry) => Some(entry),
            Err(error) => {
                tracing::warn!(%error, "keyring unavailable; using credentials file");
                None
            }
        }
    }
}

impl TokenStore for KeyringStore {
    fn load(&self) -> Result<Option<StoredSession>, AuthError> {
        if let Some(entry) = self.entry()
            && let Ok(raw) = entry.get_password()
            && !raw.trim().is_empty()
        {
            return serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| AuthError::TokenStore(format!("parse keyring entry: {e}")));
        }
        self.fallback.load()
    }

    fn save(&self, session: &StoredSession) -> Result<(), AuthError> {
        let json = serde_json::to_string(session)
            .map_err(|e| AuthError::TokenStore(format!("serialize session: {e}")))?;
        match self.entry().map(|entry| entry.set_password(&json)) {
            Some(Ok(())) => Ok(()),
            Some(Err(error)) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                self.fallback.save(session)
            }
            None => self.fallback.save(session),
        }
    }

    fn clear(&self) -> Result<(), AuthError> {
        // The entry may not exist.
        if let Some(entry) = self.entry() {
            let _ = entry.delete_credential();
        }
        self.fallback.clear()
    }

    fn source(&self) -> &'static str {
        "keyring"
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process storage. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<StoredSession>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session(session: StoredSession) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(session))),
        }
    }

    /// Current contents.
    #[must_use]
    pub fn snapshot(&self) -> Option<StoredSession> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TokenStore for MemoryStore {
    fn load(&self) -> Result<Option<StoredSession>, AuthError> {
        Ok(self.snapshot())
    }

    fn save(&self, session: &StoredSession) -> Result<(), AuthError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }

    fn source(&self) -> &'static str {
        "memory"
    }
}
