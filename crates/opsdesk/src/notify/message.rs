//! Push message payloads.
//!
//! The provider delivers `{notification: {title, body}, data: {url, ...}}`.
//! Both halves are optional on the wire; display falls back to a generic
//! title and messages without a `url` simply focus the app.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushNotification {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
    #[serde(default)]
    pub notification: Option<PushNotification>,
    #[serde(default)]
    pub data: HashMap<String, String>,
}

impl PushMessage {
    /// Title to display; defaults when the payload is data-only.
    pub fn title(&self) -> &str {
        self.notification
            .as_ref()
            .map(|n| n.title.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or("Opsdesk")
    }

    pub fn body(&self) -> &str {
        self.notification
            .as_ref()
            .map(|n| n.body.as_str())
            .unwrap_or("")
    }

    /// Click-through URL, when the payload carries one.
    pub fn target_url(&self) -> Option<&str> {
        self.data.get("url").map(String::as_str).filter(|u| !u.is_empty())
    }
}
