//! Application state for the desktop shell.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use opsdesk::api::{ApiClient, ApiTransport};
use opsdesk::broadcast::{PushBroadcaster, ToastBroadcaster};
use opsdesk::fields::FieldRegistry;
use opsdesk::notify::PushRegistrar;
use opsdesk::session::{SessionStore, UserCache};
use opsdesk::settings::{load_settings, Settings};
use opsdesk::stages::{StageActions, StageRegistry};

/// Everything the command handlers reach for, built once at startup.
pub struct AppState {
    pub config_dir: PathBuf,
    pub settings: Settings,
    pub session: Arc<SessionStore>,
    pub user_cache: UserCache,
    pub fields: FieldRegistry,
    pub stages: Arc<StageRegistry>,
    pub stage_actions: StageActions,
    pub push: PushRegistrar,
    pub toasts: ToastBroadcaster,
    pub push_events: PushBroadcaster,
}

impl AppState {
    /// Builds the state from the config directory.
    ///
    /// An unreadable settings file degrades to defaults with a warning; a
    /// misconfigured token key or broken session directory is a hard error.
    pub fn initialize(config_dir: &Path) -> Result<Self, String> {
        let settings_path = config_dir.join("settings.yaml");
        let settings = match load_settings(&settings_path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Falling back to default settings: {}", e);
                Settings::default()
            }
        };

        let session = Arc::new(SessionStore::open(config_dir).map_err(|e| e.to_string())?);
        let transport: Arc<dyn ApiTransport> =
            Arc::new(ApiClient::new(&settings, session.clone()).map_err(|e| e.to_string())?);

        let toasts = ToastBroadcaster::default();
        let push_events = PushBroadcaster::default();

        let user_cache = UserCache::new(
            session.clone(),
            Duration::from_secs(settings.user_cache_ttl_secs),
        );
        let fields = FieldRegistry::new(transport.clone());
        let stages = Arc::new(StageRegistry::new(transport.clone(), toasts.clone()));
        let stage_actions = StageActions::new(transport.clone());
        let push = PushRegistrar::new(transport, session.clone(), settings.push_platform.clone());

        info!("App state initialized against {}", settings.server_url);

        Ok(Self {
            config_dir: config_dir.to_path_buf(),
            settings,
            session,
            user_cache,
            fields,
            stages,
            stage_actions,
            push,
            toasts,
            push_events,
        })
    }
}

/// Returns the default config directory path for the current platform.
/// - macOS: ~/Library/Application Support/opsdesk
/// - Linux: ~/.config/opsdesk
/// - Windows: %APPDATA%/opsdesk
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("opsdesk"))
}

/// Ensures the config directory exists and has a settings file.
pub fn ensure_settings_initialized(config_dir: &Path) -> Result<(), String> {
    if !config_dir.exists() {
        info!("Creating config directory: {:?}", config_dir);
        std::fs::create_dir_all(config_dir)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }

    let settings_path = config_dir.join("settings.yaml");
    if !settings_path.exists() {
        info!("Creating default settings.yaml");

        let defaults = Settings::default();
        let content = format!(
            r#"serverUrl: "{}"
connectTimeoutSecs: {}
requestTimeoutSecs: {}
userCacheTtlSecs: {}
pushPlatform: "{}"
"#,
            defaults.server_url,
            defaults.connect_timeout_secs,
            defaults.request_timeout_secs,
            defaults.user_cache_ttl_secs,
            defaults.push_platform,
        );

        std::fs::write(&settings_path, content)
            .map_err(|e| format!("Failed to write settings.yaml: {}", e))?;
    }

    Ok(())
}
