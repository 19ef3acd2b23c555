use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_CONFIG_FILE: &str = "template-workspace.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub download_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub toast_duration_secs: u64,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        WorkspaceConfig {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            session_file: PathBuf::from("session.json"),
            download_dir: PathBuf::from("."),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            toast_duration_secs: 3,
        }
    }
}

impl WorkspaceConfig {
    /// Load configuration from file with environment variable overrides.
    ///
    /// A missing file falls back to defaults; a file that exists but cannot
    /// be parsed is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            log::warn!(
                "Config file {} not found, using defaults",
                path.display()
            );
            WorkspaceConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("TEMPLATE_API_URL") {
            self.api_base_url = url;
        }
        if let Ok(session_file) = env::var("TEMPLATE_SESSION_FILE") {
            self.session_file = PathBuf::from(session_file);
        }
        if let Ok(download_dir) = env::var("TEMPLATE_DOWNLOAD_DIR") {
            self.download_dir = PathBuf::from(download_dir);
        }
        if let Ok(timeout) = env::var("TEMPLATE_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse::<u64>() {
                self.request_timeout_secs = secs;
            }
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_duration_secs)
    }
}
