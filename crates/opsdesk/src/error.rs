use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpsdeskError {
    #[error("API error: {0}")]
    Api(#[from] crate::api::ApiError),

    #[error("Field error: {0}")]
    Fields(#[from] crate::fields::FieldError),

    #[error("Session error: {0}")]
    Session(#[from] crate::session::SessionError),

    #[error("Notification error: {0}")]
    Notify(#[from] crate::notify::NotifyError),

    #[error("Settings error: {0}")]
    Settings(#[from] crate::settings::SettingsError),
}

pub type Result<T> = std::result::Result<T, OpsdeskError>;
