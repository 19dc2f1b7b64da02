//! Cache-less access to field definitions and per-record values.
//!
//! Definitions are re-fetched on every call: schema edits made by an
//! administrator in one session must be visible to every other session
//! without explicit invalidation.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use reqwest::Method;
use serde_json::{json, Value};

use super::error::{FieldError, Result};
use super::schema::{
    normalize_definition, normalize_definitions, validate_field_key, EntityType, FieldDefinition,
    FieldDraft,
};
use crate::api::{parse_list, ApiError, ApiTransport};

pub struct FieldRegistry {
    transport: Arc<dyn ApiTransport>,
}

impl FieldRegistry {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// Fetches and normalizes the definitions for one entity type.
    pub async fn fetch_definitions(&self, entity: EntityType) -> Result<Vec<FieldDefinition>> {
        let path = entity.definitions_path();
        let payload = self.transport.request(Method::GET, &path, &[], None).await?;
        let raw: Vec<Value> = parse_list(&path, payload)?;

        let definitions = normalize_definitions(entity, raw);
        debug!("Fetched {} field definitions for '{}'", definitions.len(), entity.key());
        Ok(definitions)
    }

    pub async fn create_definition(
        &self,
        entity: EntityType,
        draft: &FieldDraft,
    ) -> Result<FieldDefinition> {
        validate_field_key(&draft.field_key)?;

        let path = entity.definitions_path();
        let body = serde_json::to_value(draft).map_err(|e| ApiError::Decode {
            url: path.clone(),
            message: e.to_string(),
        })?;
        let payload = self
            .transport
            .request(Method::POST, &path, &[], Some(body))
            .await?;

        decode_definition(entity, &path, &payload)
    }

    pub async fn update_definition(
        &self,
        entity: EntityType,
        id: &str,
        draft: &FieldDraft,
    ) -> Result<FieldDefinition> {
        validate_field_key(&draft.field_key)?;

        let path = format!("{}/{}", entity.definitions_path(), id);
        let body = serde_json::to_value(draft).map_err(|e| ApiError::Decode {
            url: path.clone(),
            message: e.to_string(),
        })?;
        let payload = self
            .transport
            .request(Method::PUT, &path, &[], Some(body))
            .await?;

        decode_definition(entity, &path, &payload)
    }

    pub async fn delete_definition(&self, entity: EntityType, id: &str) -> Result<()> {
        let path = format!("{}/{}", entity.definitions_path(), id);
        self.transport.request(Method::DELETE, &path, &[], None).await?;
        Ok(())
    }

    /// Fetches one record's values as a flat `fieldKey -> value` mapping.
    ///
    /// Missing keys are simply absent; callers treat absence as unset.
    pub async fn fetch_values(
        &self,
        entity: EntityType,
        record_id: &str,
    ) -> Result<HashMap<String, String>> {
        let path = entity.values_path(record_id);
        let payload = self.transport.request(Method::GET, &path, &[], None).await?;
        let raw: Vec<Value> = parse_list(&path, payload)?;

        let mut values = HashMap::with_capacity(raw.len());
        for entry in &raw {
            let Some(field_key) = entry.get("fieldKey").and_then(Value::as_str) else {
                continue;
            };
            values.insert(field_key.to_string(), value_to_string(entry.get("value")));
        }
        Ok(values)
    }

    /// Upserts one value; `None` transmits the empty string ("unset").
    pub async fn upsert_value(
        &self,
        entity: EntityType,
        record_id: &str,
        field_key: &str,
        value: Option<&str>,
    ) -> Result<()> {
        let path = entity.values_path(record_id);
        let body = json!({
            "fieldKey": field_key,
            "value": value.unwrap_or(""),
        });
        self.transport
            .request(Method::POST, &path, &[], Some(body))
            .await?;
        Ok(())
    }
}

fn decode_definition(entity: EntityType, path: &str, payload: &Value) -> Result<FieldDefinition> {
    normalize_definition(entity, payload).ok_or_else(|| {
        FieldError::Api(ApiError::Decode {
            url: path.to_string(),
            message: "definition payload is missing 'fieldKey'".to_string(),
        })
    })
}

/// Stored values are strings, but older records carry raw numbers/booleans.
fn value_to_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_to_string_shapes() {
        assert_eq!(value_to_string(Some(&json!("x"))), "x");
        assert_eq!(value_to_string(Some(&json!(3))), "3");
        assert_eq!(value_to_string(Some(&json!(true))), "true");
        assert_eq!(value_to_string(Some(&Value::Null)), "");
        assert_eq!(value_to_string(None), "");
    }
}
