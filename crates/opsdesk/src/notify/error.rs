use thiserror::Error;

use crate::api::ApiError;
use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Push messaging is not supported in this environment")]
    NotSupported,

    #[error("Notification permission was denied")]
    PermissionDenied,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

pub type Result<T> = std::result::Result<T, NotifyError>;
