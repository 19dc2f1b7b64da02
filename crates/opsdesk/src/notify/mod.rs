//! Push notifications: backend registration and the foreground message model.

pub mod error;
pub mod message;
pub mod registration;

pub use error::NotifyError;
pub use message::{PushMessage, PushNotification};
pub use registration::PushRegistrar;
