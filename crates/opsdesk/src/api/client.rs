//! Backend API client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Method, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use super::error::{ApiError, Result};
use crate::settings::Settings;

/// Maximum length for error bodies echoed into messages and logs.
const MAX_ERROR_BODY_LENGTH: usize = 200;

/// Source of the bearer token attached to requests.
///
/// Absence of a token is not an error at this layer; the request simply goes
/// out unauthenticated and the backend answers 401 as it sees fit.
pub trait TokenProvider: Send + Sync {
    fn bearer_token(&self) -> Option<SecretString>;
}

/// Transport seam between registries and the network.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Issues one request and returns the decoded JSON body.
    ///
    /// Empty bodies (204, zero-length 200) decode to `Value::Null`.
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<Value>;
}

/// reqwest-backed [`ApiTransport`] for the backend API.
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    pub fn new(settings: &Settings, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        let base = Url::parse(&settings.server_url).map_err(|e| ApiError::BaseUrl {
            url: settings.server_url.clone(),
            reason: e.to_string(),
        })?;

        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(ApiError::BaseUrl {
                url: settings.server_url.clone(),
                reason: format!("unsupported scheme '{}'", base.scheme()),
            });
        }

        let http = Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport {
                url: settings.server_url.clone(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: base.as_str().trim_end_matches('/').to_string(),
            tokens,
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl ApiTransport for ApiClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<Value> {
        let url = self.url_for(path);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, url.as_str());

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(token) = self.tokens.bearer_token() {
            request = request.bearer_auth(token.expose_secret());
        }

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| ApiError::Transport {
            url: url.clone(),
            source: e,
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Transport {
            url: url.clone(),
            source: e,
        })?;

        if !status.is_success() {
            let message = remote_message(&text);
            warn!("{} from '{}': {}", status, url, message);
            return Err(ApiError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

/// Extracts a human-readable message from an error body.
///
/// The backend answers errors as `{"message": ...}` or `{"error": ...}`;
/// anything else is echoed truncated so token-bearing bodies cannot flood
/// the logs.
fn remote_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = value.get(key).and_then(Value::as_str) {
                return message.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no error details provided".to_string();
    }
    if trimmed.len() > MAX_ERROR_BODY_LENGTH {
        format!("{}... (truncated)", &trimmed[..MAX_ERROR_BODY_LENGTH])
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoToken;

    impl TokenProvider for NoToken {
        fn bearer_token(&self) -> Option<SecretString> {
            None
        }
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let settings = Settings {
            server_url: "http://localhost:8080/api/".to_string(),
            ..Settings::default()
        };
        let client = ApiClient::new(&settings, Arc::new(NoToken)).unwrap();
        assert_eq!(
            client.url_for("/stages/departments"),
            "http://localhost:8080/api/stages/departments"
        );
        assert_eq!(client.url_for("deals/7/timeline"), "http://localhost:8080/api/deals/7/timeline");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let settings = Settings {
            server_url: "file:///etc/passwd".to_string(),
            ..Settings::default()
        };
        let result = ApiClient::new(&settings, Arc::new(NoToken));
        assert!(matches!(result, Err(ApiError::BaseUrl { .. })));
    }

    #[test]
    fn test_remote_message_prefers_message_field() {
        assert_eq!(remote_message(r#"{"message": "stage not found"}"#), "stage not found");
        assert_eq!(remote_message(r#"{"error": "forbidden"}"#), "forbidden");
    }

    #[test]
    fn test_remote_message_truncates_raw_bodies() {
        let long = "x".repeat(500);
        let message = remote_message(&long);
        assert!(message.ends_with("(truncated)"));
        assert!(message.len() < 250);
    }

    #[test]
    fn test_remote_message_empty_body() {
        assert_eq!(remote_message("  "), "no error details provided");
    }
}
