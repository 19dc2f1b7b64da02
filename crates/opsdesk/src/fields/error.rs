use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("Unknown entity type '{0}'")]
    UnknownEntityType(String),

    #[error("Invalid field key '{key}': {reason}")]
    InvalidFieldKey { key: String, reason: String },

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type Result<T> = std::result::Result<T, FieldError>;
