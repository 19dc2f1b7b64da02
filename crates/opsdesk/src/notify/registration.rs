//! Push token registration against the backend.

use std::sync::Arc;

use log::{debug, info};
use reqwest::Method;
use serde_json::json;

use super::error::Result;
use crate::api::ApiTransport;
use crate::session::SessionStore;

const REGISTRATIONS_PATH: &str = "push/registrations";

/// Registers the device's push token with the backend.
///
/// The issued token is cached in the session so repeated startup paths do
/// not re-register; a changed token (provider rotation) registers again.
pub struct PushRegistrar {
    transport: Arc<dyn ApiTransport>,
    session: Arc<SessionStore>,
    platform: String,
}

impl PushRegistrar {
    pub fn new(transport: Arc<dyn ApiTransport>, session: Arc<SessionStore>, platform: String) -> Self {
        Self {
            transport,
            session,
            platform,
        }
    }

    /// Registers `token` for the logged-in employee.
    ///
    /// Returns `Ok(false)` when nothing was sent: the token is already
    /// registered, or nobody is logged in (registration without an employee
    /// is meaningless, so notifications stay disabled until login).
    pub async fn register(&self, token: &str) -> Result<bool> {
        if self.session.push_token().as_deref() == Some(token) {
            debug!("Push token already registered, skipping");
            return Ok(false);
        }

        let Some(user) = self.session.user() else {
            debug!("No authenticated user; push registration deferred");
            return Ok(false);
        };

        let body = json!({
            "employeeId": user.employee_id,
            "platform": self.platform,
            "token": token,
            "deviceId": self.session.device_id(),
        });
        self.transport
            .request(Method::POST, REGISTRATIONS_PATH, &[], Some(body))
            .await?;

        self.session.set_push_token(Some(token.to_string()))?;
        info!("Registered push token for employee {}", user.employee_id);
        Ok(true)
    }
}
