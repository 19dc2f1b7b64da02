//! Event bridge between the opsdesk library and the webview.

use std::sync::Arc;

use log::{debug, info, warn};
use opsdesk::notify::PushMessage;
use tauri::{AppHandle, Emitter, Manager};
use tauri_plugin_notification::NotificationExt;
use tokio::sync::RwLock;

use crate::state::AppState;

/// Event names for Tauri events.
pub mod event_names {
    pub const TOAST: &str = "opsdesk://toast";
    pub const PUSH: &str = "opsdesk://push";
}

/// Starts the bridge tasks forwarding library broadcasts to the frontend.
pub async fn start_event_bridge(app_handle: AppHandle) {
    info!("Starting event bridge");

    let state: Arc<RwLock<AppState>> = app_handle.state::<Arc<RwLock<AppState>>>().inner().clone();
    let (toasts, pushes) = {
        let state = state.read().await;
        (state.toasts.clone(), state.push_events.clone())
    };

    // Toast listener: transient notifications for the frontend tray.
    let app_clone = app_handle.clone();
    let mut toast_rx = toasts.subscribe();
    tauri::async_runtime::spawn(async move {
        loop {
            match toast_rx.recv().await {
                Ok(event) => {
                    if let Err(e) = app_clone.emit(event_names::TOAST, &event) {
                        debug!("Failed to emit toast event: {}", e);
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                    warn!("Toast bridge lagged, missed {} events", n);
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                    info!("Toast broadcaster closed, stopping toast bridge");
                    break;
                }
            }
        }
    });

    // Push listener: foreground messages become system notifications plus a
    // frontend event so an open page can react in place.
    let app_clone = app_handle.clone();
    let mut push_rx = pushes.subscribe();
    tauri::async_runtime::spawn(async move {
        loop {
            match push_rx.recv().await {
                Ok(message) => {
                    show_system_notification(&app_clone, &message);
                    if let Err(e) = app_clone.emit(event_names::PUSH, &message) {
                        debug!("Failed to emit push event: {}", e);
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                    warn!("Push bridge lagged, missed {} messages", n);
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                    info!("Push broadcaster closed, stopping push bridge");
                    break;
                }
            }
        }
    });
}

fn show_system_notification(app: &AppHandle, message: &PushMessage) {
    let result = app
        .notification()
        .builder()
        .title(message.title())
        .body(message.body())
        .show();

    if let Err(e) = result {
        // Notifications are best effort; the frontend event still fires.
        warn!("Failed to show system notification: {}", e);
    }
}
