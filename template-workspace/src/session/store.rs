use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::SessionStoreError;

use super::Credential;

/// On-disk shape of the persisted session. The token lives under the
/// well-known `token` key.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// File-backed storage for the bearer credential.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored credential, or `None` when the file is absent or
    /// holds no (or a blank) token.
    pub fn load(&self) -> Result<Option<Credential>, SessionStoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.io_error(source)),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let persisted: PersistedSession =
            serde_json::from_str(&content).map_err(|source| SessionStoreError::Malformed {
                path: self.path.display().to_string(),
                source,
            })?;

        Ok(persisted
            .token
            .filter(|token| !token.trim().is_empty())
            .map(Credential::new))
    }

    pub fn store(&self, credential: &Credential) -> Result<(), SessionStoreError> {
        let persisted = PersistedSession {
            token: Some(credential.expose().to_string()),
        };
        self.write(&persisted)
    }

    /// Removes the persisted token. Clearing an already empty store is fine.
    pub fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn write(&self, persisted: &PersistedSession) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }

        let content = serde_json::to_string_pretty(persisted).map_err(|source| {
            SessionStoreError::Malformed {
                path: self.path.display().to_string(),
                source,
            }
        })?;

        fs::write(&self.path, content).map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> SessionStoreError {
        SessionStoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}
