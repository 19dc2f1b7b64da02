//! File-backed session persistence.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use log::{debug, warn};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{Result, SessionError};
use crate::api::TokenProvider;
use crate::secrets::TokenEncryptor;

/// The user the backend authenticated, as stored at login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub id: String,
    pub employee_id: String,
    pub display_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub department: Option<String>,
}

/// On-disk shape of the session file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionFile {
    #[serde(default)]
    encrypted_token: Option<String>,
    #[serde(default)]
    user: Option<AuthenticatedUser>,
    #[serde(default)]
    device_id: Option<Uuid>,
    #[serde(default)]
    push_token: Option<String>,
}

struct SessionState {
    token: Option<SecretString>,
    user: Option<AuthenticatedUser>,
    device_id: Uuid,
    push_token: Option<String>,
}

/// Session store backed by `session.json` in the config directory.
///
/// The bearer token is held decrypted in memory and encrypted at rest. When
/// no encryption key is configured the token is kept in memory only: the
/// session survives restarts, the login does not.
pub struct SessionStore {
    path: PathBuf,
    encryptor: Option<TokenEncryptor>,
    inner: RwLock<SessionState>,
}

impl SessionStore {
    /// Opens (or starts) the session under `config_dir`.
    ///
    /// A corrupt session file is discarded with a warning rather than
    /// failing startup; an invalid encryption key is a hard error because it
    /// means the operator misconfigured `OPSDESK_TOKEN_KEY`.
    pub fn open(config_dir: &Path) -> Result<Self> {
        let encryptor = TokenEncryptor::from_env()?;
        if encryptor.is_none() {
            warn!("No token encryption key configured; the session token will not be persisted");
        }

        std::fs::create_dir_all(config_dir).map_err(|e| SessionError::WriteFile {
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let path = config_dir.join("session.json");
        let file = read_session_file(&path)?;

        let token = match (&file.encrypted_token, &encryptor) {
            (Some(ciphertext), Some(encryptor)) => match encryptor.decrypt(ciphertext) {
                Ok(plaintext) => Some(SecretString::from(plaintext)),
                Err(e) => {
                    warn!("Stored session token could not be decrypted, discarding it: {}", e);
                    None
                }
            },
            (Some(_), None) => {
                warn!("Stored session token present but no encryption key configured, ignoring it");
                None
            }
            _ => None,
        };

        let generated_device_id = file.device_id.is_none();
        let store = Self {
            path,
            encryptor,
            inner: RwLock::new(SessionState {
                token,
                user: file.user,
                device_id: file.device_id.unwrap_or_else(Uuid::new_v4),
                push_token: file.push_token,
            }),
        };

        // A fresh device id must survive restarts, so write it out right away.
        if generated_device_id {
            store.persist()?;
        }

        Ok(store)
    }

    /// Records a fresh login and persists it.
    pub fn login(&self, token: SecretString, user: AuthenticatedUser) -> Result<()> {
        {
            let mut state = self.inner.write().unwrap_or_else(|e| e.into_inner());
            state.token = Some(token);
            state.user = Some(user);
        }
        debug!("Session updated after login");
        self.persist()
    }

    /// Clears the login but keeps the device identity.
    pub fn logout(&self) -> Result<()> {
        {
            let mut state = self.inner.write().unwrap_or_else(|e| e.into_inner());
            state.token = None;
            state.user = None;
            state.push_token = None;
        }
        debug!("Session cleared after logout");
        self.persist()
    }

    pub fn token(&self) -> Option<SecretString> {
        let state = self.inner.read().unwrap_or_else(|e| e.into_inner());
        state
            .token
            .as_ref()
            .map(|token| SecretString::from(token.expose_secret().to_string()))
    }

    pub fn user(&self) -> Option<AuthenticatedUser> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .user
            .clone()
    }

    pub fn device_id(&self) -> Uuid {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).device_id
    }

    pub fn push_token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .push_token
            .clone()
    }

    pub fn set_push_token(&self, token: Option<String>) -> Result<()> {
        {
            let mut state = self.inner.write().unwrap_or_else(|e| e.into_inner());
            state.push_token = token;
        }
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let file = {
            let state = self.inner.read().unwrap_or_else(|e| e.into_inner());
            let encrypted_token = match (&state.token, &self.encryptor) {
                (Some(token), Some(encryptor)) => Some(encryptor.encrypt(token.expose_secret())?),
                _ => None,
            };
            SessionFile {
                encrypted_token,
                user: state.user.clone(),
                device_id: Some(state.device_id),
                push_token: state.push_token.clone(),
            }
        };

        let content = serde_json::to_string_pretty(&file)?;
        std::fs::write(&self.path, content).map_err(|e| SessionError::WriteFile {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl TokenProvider for SessionStore {
    fn bearer_token(&self) -> Option<SecretString> {
        self.token()
    }
}

fn read_session_file(path: &Path) -> Result<SessionFile> {
    if !path.exists() {
        return Ok(SessionFile::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| SessionError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    match serde_json::from_str(&content) {
        Ok(file) => Ok(file),
        Err(e) => {
            warn!("Session file '{}' is corrupt, starting fresh: {}", path.display(), e);
            Ok(SessionFile::default())
        }
    }
}
