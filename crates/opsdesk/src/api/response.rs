//! Normalization of the backend's list payload shapes.
//!
//! List endpoints answer with either a bare JSON array, a page wrapper
//! `{"content": [...]}`, or a data wrapper `{"data": [...]}`. The shape is
//! resolved exactly once here; everything downstream sees a plain `Vec`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::error::ApiError;

/// The three list shapes the backend is known to produce.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Items(Vec<T>),
    Page { content: Vec<T> },
    Wrapped { data: Vec<T> },
}

impl<T> ListPayload<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListPayload::Items(items) => items,
            ListPayload::Page { content } => content,
            ListPayload::Wrapped { data } => data,
        }
    }
}

/// Decodes a list payload in any supported shape.
///
/// `null` and empty bodies normalize to an empty sequence; an unrecognized
/// shape is a decode error carrying the endpoint for context.
pub fn parse_list<T: DeserializeOwned>(path: &str, payload: Value) -> Result<Vec<T>, ApiError> {
    if payload.is_null() {
        return Ok(Vec::new());
    }

    serde_json::from_value::<ListPayload<T>>(payload)
        .map(ListPayload::into_items)
        .map_err(|e| ApiError::Decode {
            url: path.to_string(),
            message: e.to_string(),
        })
}
