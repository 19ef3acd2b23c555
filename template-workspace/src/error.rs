use thiserror::Error;

/// Failures a workspace flow can end in.
///
/// `AuthRejected` is fatal to the session and is handled globally; the other
/// variants are reported to the user and leave the workspace state untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkspaceError {
    #[error("session credential was rejected")]
    AuthRejected,

    #[error("{0}")]
    ValidationFailed(String),

    #[error("failed to {action}: server responded with status {status}")]
    RemoteFailure { action: &'static str, status: u16 },

    #[error("failed to {action}: {message}")]
    TransportFailure {
        action: &'static str,
        message: String,
    },

    /// The credential could not be written to or removed from local storage.
    #[error("failed to save session locally: {0}")]
    SessionPersistence(String),
}

impl WorkspaceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed(message.into())
    }

    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, Self::AuthRejected)
    }
}

pub type Result<T> = std::result::Result<T, WorkspaceError>;

#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("failed to access session file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("session file {path} is malformed: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
