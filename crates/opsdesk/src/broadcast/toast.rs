//! Transient notifications for the frontend toast tray.
//!
//! Data-fetch failures degrade to empty views plus one of these; nothing in
//! the client treats a failed fetch as fatal.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToastEvent {
    pub timestamp: DateTime<Utc>,
    pub level: ToastLevel,
    pub message: String,
}

impl ToastEvent {
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
        }
    }
}

#[derive(Clone)]
pub struct ToastBroadcaster {
    sender: broadcast::Sender<ToastEvent>,
}

impl ToastBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ToastEvent> {
        self.sender.subscribe()
    }

    pub fn send(&self, event: ToastEvent) {
        // No active receivers is fine - toasts are best effort.
        let _ = self.sender.send(event);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.send(ToastEvent::new(ToastLevel::Info, message));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.send(ToastEvent::new(ToastLevel::Success, message));
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.send(ToastEvent::new(ToastLevel::Warning, message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.send(ToastEvent::new(ToastLevel::Error, message));
    }
}

impl Default for ToastBroadcaster {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_and_receive() {
        let broadcaster = ToastBroadcaster::new(8);
        let mut rx = broadcaster.subscribe();

        broadcaster.error("Failed to load stages");

        let event = rx.try_recv().unwrap();
        assert_eq!(event.level, ToastLevel::Error);
        assert_eq!(event.message, "Failed to load stages");
    }

    #[test]
    fn test_send_without_receivers_is_ok() {
        let broadcaster = ToastBroadcaster::default();
        broadcaster.info("nobody listening");
    }
}
