//! Session commands.
//!
//! The client does not authenticate anyone: the webview runs the login flow
//! against the backend and hands the issued token here for safekeeping.

use std::sync::Arc;

use opsdesk::session::AuthenticatedUser;
use secrecy::SecretString;
use tauri::State;
use tokio::sync::RwLock;

use super::ApiResponse;
use crate::state::AppState;

#[tauri::command]
pub async fn login(
    token: String,
    user: AuthenticatedUser,
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<()>, String> {
    let state = state.read().await;

    match state.session.login(SecretString::from(token), user) {
        Ok(()) => {
            state.user_cache.invalidate();
            Ok(ApiResponse::ok(()))
        }
        Err(e) => Ok(ApiResponse::err(e.to_string())),
    }
}

#[tauri::command]
pub async fn logout(state: State<'_, Arc<RwLock<AppState>>>) -> Result<ApiResponse<()>, String> {
    let state = state.read().await;

    match state.session.logout() {
        Ok(()) => {
            state.user_cache.invalidate();
            Ok(ApiResponse::ok(()))
        }
        Err(e) => Ok(ApiResponse::err(e.to_string())),
    }
}

#[tauri::command]
pub async fn current_user(
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<Option<AuthenticatedUser>>, String> {
    let state = state.read().await;
    let user = state.user_cache.current_user().map(|u| (*u).clone());
    Ok(ApiResponse::ok(user))
}
