//! Bearer credential storage.
//!
//! The transport is handed a [`CredentialStore`] at construction and is the
//! only component that reads or writes it.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Capability to persist a single opaque bearer credential.
pub trait CredentialStore: Send + Sync {
    /// Current credential, if any.
    fn get(&self) -> Option<String>;

    /// Replace the stored credential.
    fn set(&self, credential: &str) -> ClientResult<()>;

    /// Forget the stored credential. Clearing an empty store is not an error.
    fn clear(&self) -> ClientResult<()>;
}

/// Process-local store. Used by tests and short-lived embeddings.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credential: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `credential`.
    pub fn with_credential(credential: &str) -> Self {
        Self {
            credential: Mutex::new(Some(credential.to_string())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<String> {
        self.credential.lock().ok().and_then(|guard| guard.clone())
    }

    fn set(&self, credential: &str) -> ClientResult<()> {
        let mut guard = self
            .credential
            .lock()
            .map_err(|e| ClientError::Credential(e.to_string()))?;
        *guard = Some(credential.to_string());
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        let mut guard = self
            .credential
            .lock()
            .map_err(|e| ClientError::Credential(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Store that keeps the credential in a single file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn set(&self, credential: &str) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ClientError::Credential(format!("create {}: {e}", parent.display()))
            })?;
        }
        write_private(&self.path, credential)
            .map_err(|e| ClientError::Credential(format!("write {}: {e}", self.path.display())))?;
        debug!(path = %self.path.display(), "stored credential");
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "cleared credential");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Credential(format!(
                "remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}

/// Write `contents` readable by the owner only.
#[cfg(unix)]
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation.
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    file.write_all(contents.as_bytes())
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    std::fs::write(path, contents)
}
