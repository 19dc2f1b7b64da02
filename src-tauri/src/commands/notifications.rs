//! Push notification commands.
//!
//! The webview owns the push provider SDK; it hands tokens and foreground
//! messages to these commands. Registration failures degrade to
//! notifications-disabled with a logged diagnostic rather than surfacing an
//! error dialog.

use std::sync::Arc;

use log::warn;
use opsdesk::notify::{NotifyError, PushMessage};
use tauri::State;
use tauri_plugin_notification::{NotificationExt, PermissionState};
use tauri_plugin_opener::OpenerExt;
use tokio::sync::RwLock;

use super::ApiResponse;
use crate::state::AppState;

/// Registers the provider-issued push token with the backend.
///
/// Returns whether a registration call was made; `false` also covers the
/// degraded cases (already registered, not logged in, backend refused).
#[tauri::command]
pub async fn register_push_token(
    token: String,
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<bool>, String> {
    let state = state.read().await;

    match state.push.register(&token).await {
        Ok(registered) => Ok(ApiResponse::ok(registered)),
        Err(e) => {
            warn!("Push registration failed, notifications stay disabled: {}", e);
            Ok(ApiResponse::ok(false))
        }
    }
}

/// Checks (and if needed requests) the notification permission.
#[tauri::command]
pub async fn ensure_notification_permission(
    app: tauri::AppHandle,
) -> Result<ApiResponse<bool>, String> {
    let permission = app
        .notification()
        .permission_state()
        .map_err(|_| NotifyError::NotSupported.to_string())?;

    let granted = match permission {
        PermissionState::Granted => true,
        PermissionState::Denied => {
            return Ok(ApiResponse::err(NotifyError::PermissionDenied.to_string()));
        }
        _ => {
            let requested = app
                .notification()
                .request_permission()
                .map_err(|_| NotifyError::NotSupported.to_string())?;
            matches!(requested, PermissionState::Granted)
        }
    };

    Ok(ApiResponse::ok(granted))
}

/// Fans a foreground push message out to the bridge (system notification +
/// frontend event).
#[tauri::command]
pub async fn publish_push_message(
    message: PushMessage,
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<()>, String> {
    let state = state.read().await;
    state.push_events.send(message);
    Ok(ApiResponse::ok(()))
}

/// Opens a notification's click-through URL.
#[tauri::command]
pub async fn open_notification_url(
    app: tauri::AppHandle,
    url: String,
) -> Result<ApiResponse<()>, String> {
    match app.opener().open_url(url, None::<&str>) {
        Ok(()) => Ok(ApiResponse::ok(())),
        Err(e) => Ok(ApiResponse::err(format!("Failed to open URL: {}", e))),
    }
}
