//! Test harness for registry tests: an in-memory API transport.
//!
//! The `StubTransport` records every request and answers from queued canned
//! responses, so caching, deduplication, and degradation behavior can be
//! exercised without a network.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use opsdesk::api::{ApiError, ApiTransport};

/// One request as the transport saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Canned outcome for one request.
pub enum StubResponse {
    Ok(Value),
    Remote(u16, &'static str),
}

#[derive(Default)]
pub struct StubTransport {
    responses: Mutex<HashMap<String, VecDeque<StubResponse>>>,
    requests: Mutex<Vec<RecordedRequest>>,
    delay: Option<Duration>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an artificial response delay so concurrent callers overlap.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    /// Queues a successful response for `path`. Responses for one path are
    /// consumed in order; an exhausted queue answers `null`.
    pub fn respond(&self, path: &str, payload: Value) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(StubResponse::Ok(payload));
        self
    }

    /// Queues a remote failure for `path`.
    pub fn fail(&self, path: &str, status: u16, message: &'static str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(StubResponse::Remote(status, message));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests issued against `path`.
    pub fn request_count(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    /// The last recorded request, for asserting on bodies.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ApiTransport for StubTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            path: path.to_string(),
            query: query.to_vec(),
            body,
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let response = self
            .responses
            .lock()
            .unwrap()
            .get_mut(path)
            .and_then(VecDeque::pop_front);

        match response {
            Some(StubResponse::Ok(payload)) => Ok(payload),
            Some(StubResponse::Remote(status, message)) => Err(ApiError::Remote {
                status,
                message: message.to_string(),
            }),
            None => Ok(Value::Null),
        }
    }
}
