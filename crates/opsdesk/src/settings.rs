//! Client settings loaded from the platform config directory.
//!
//! The desktop shell writes a default `settings.yaml` on first run; this
//! module parses and validates it. Only the backend location and a handful of
//! timeouts live here; everything else (field schemas, stage catalogs,
//! permissions) is owned by the backend.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("Settings validation failed: {message}")]
    Validation { message: String },
}

/// Client settings for the backend connection and local caches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Base URL of the backend API, e.g. `https://api.example.com/api/v1`.
    pub server_url: String,

    /// Connect timeout for backend requests, in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Per-request timeout for backend requests, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// TTL for the memoized authenticated-user read, in seconds.
    #[serde(default = "default_user_cache_ttl")]
    pub user_cache_ttl_secs: u64,

    /// Platform identifier sent with push registrations.
    #[serde(default = "default_push_platform")]
    pub push_platform: String,
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_user_cache_ttl() -> u64 {
    30
}

fn default_push_platform() -> String {
    "desktop".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080/api".to_string(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
            user_cache_ttl_secs: default_user_cache_ttl(),
            push_platform: default_push_platform(),
        }
    }
}

pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, SettingsError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_settings_from_str(&content)
}

pub fn load_settings_from_str(content: &str) -> Result<Settings, SettingsError> {
    let settings: Settings = serde_yaml::from_str(content)?;

    validate_settings(&settings)?;

    Ok(settings)
}

fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    let url = reqwest::Url::parse(&settings.server_url).map_err(|e| SettingsError::Validation {
        message: format!("Invalid server URL '{}': {}", settings.server_url, e),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(SettingsError::Validation {
            message: format!("Server URL must be http or https, got '{}'", url.scheme()),
        });
    }

    if settings.connect_timeout_secs == 0 || settings.request_timeout_secs == 0 {
        return Err(SettingsError::Validation {
            message: "Timeouts must be greater than zero".to_string(),
        });
    }

    Ok(())
}
