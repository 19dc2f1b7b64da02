//! Foreground push message fan-out.
//!
//! Push messages arriving while the app is in the foreground are broadcast
//! here; the shell's event bridge turns them into system notifications and
//! frontend events.

use tokio::sync::broadcast;

use crate::notify::PushMessage;

#[derive(Clone)]
pub struct PushBroadcaster {
    sender: broadcast::Sender<PushMessage>,
}

impl PushBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PushMessage> {
        self.sender.subscribe()
    }

    pub fn send(&self, message: PushMessage) {
        let _ = self.sender.send(message);
    }
}

impl Default for PushBroadcaster {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwarding() {
        let broadcaster = PushBroadcaster::new(4);
        let mut rx = broadcaster.subscribe();

        let message: PushMessage = serde_json::from_value(serde_json::json!({
            "notification": {"title": "Deal won", "body": "ACME signed"},
            "data": {"url": "/deals/9"}
        }))
        .unwrap();
        broadcaster.send(message);

        let received = rx.try_recv().unwrap();
        assert_eq!(received.target_url(), Some("/deals/9"));
    }
}
