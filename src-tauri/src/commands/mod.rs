//! Tauri commands for the Opsdesk desktop application.
//!
//! Commands are organized by domain:
//! - `app`: Health and settings
//! - `auth`: Login, logout, current user
//! - `fields`: Field definition CRUD and record values
//! - `stages`: Departments, stage catalogs, pipeline, transitions
//! - `notifications`: Push registration and notification plumbing

pub mod app;
pub mod auth;
pub mod fields;
pub mod notifications;
pub mod stages;

// Re-export all commands for convenient registration
pub use app::*;
pub use auth::*;
pub use fields::*;
pub use notifications::*;
pub use stages::*;

use serde::Serialize;

/// Response wrapper for API calls.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
