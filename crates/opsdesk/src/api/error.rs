use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Backend returned {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Failed to decode response from '{url}': {message}")]
    Decode { url: String, message: String },

    #[error("Invalid API base URL '{url}': {reason}")]
    BaseUrl { url: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;
