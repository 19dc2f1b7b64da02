//! Health and settings commands.

use std::sync::Arc;

use opsdesk::settings::Settings;
use serde::Serialize;
use tauri::State;
use tokio::sync::RwLock;

use super::ApiResponse;
use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub server_url: String,
    pub logged_in: bool,
    pub departments_cached: usize,
}

#[tauri::command]
pub async fn health_check(
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<HealthStatus>, String> {
    let state = state.read().await;

    Ok(ApiResponse::ok(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        server_url: state.settings.server_url.clone(),
        logged_in: state.session.user().is_some(),
        departments_cached: state.stages.departments().len(),
    }))
}

#[tauri::command]
pub async fn get_settings(
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<Settings>, String> {
    let state = state.read().await;
    Ok(ApiResponse::ok(state.settings.clone()))
}
