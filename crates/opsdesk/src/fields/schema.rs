//! Field definition schema and payload normalization.
//!
//! The backend stores definitions loosely (string-typed `fieldType`,
//! `optionsJson` as either an array or an embedded JSON string). All of that
//! is normalized here, once, into the closed shapes the rest of the crate
//! matches on exhaustively.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::FieldError;

/// The record kinds that can carry custom fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Product,
    Bank,
    Deal,
}

impl EntityType {
    pub const ALL: [EntityType; 3] = [EntityType::Product, EntityType::Bank, EntityType::Deal];

    /// Resolves a string entity key from the frontend.
    pub fn from_key(key: &str) -> Result<Self, FieldError> {
        match key.to_ascii_lowercase().as_str() {
            "product" => Ok(EntityType::Product),
            "bank" => Ok(EntityType::Bank),
            "deal" => Ok(EntityType::Deal),
            other => Err(FieldError::UnknownEntityType(other.to_string())),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            EntityType::Product => "product",
            EntityType::Bank => "bank",
            EntityType::Deal => "deal",
        }
    }

    /// API path for definition CRUD, e.g. `product-fields`.
    pub fn definitions_path(&self) -> String {
        format!("{}-fields", self.key())
    }

    /// API path for one record's values, e.g. `products/{id}/fields`.
    pub fn values_path(&self, record_id: &str) -> String {
        format!("{}s/{}/fields", self.key(), record_id)
    }
}

/// The closed set of field types; everything unknown collapses to `Text`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Boolean,
    Date,
    Dropdown,
}

impl FieldType {
    /// Normalizes a raw backend value. The fallback to `Text` is the
    /// contract, not an accident: definitions written by newer backend
    /// versions must still render as plain text here.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::to_ascii_uppercase).as_deref() {
            Some("NUMBER") => FieldType::Number,
            Some("BOOLEAN") => FieldType::Boolean,
            Some("DATE") => FieldType::Date,
            Some("DROPDOWN") => FieldType::Dropdown,
            _ => FieldType::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "TEXT",
            FieldType::Number => "NUMBER",
            FieldType::Boolean => "BOOLEAN",
            FieldType::Date => "DATE",
            FieldType::Dropdown => "DROPDOWN",
        }
    }
}

/// One admin-authored custom field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: String,
    pub entity_type: EntityType,
    pub field_key: String,
    pub field_name: String,
    pub field_type: FieldType,
    pub required: bool,
    pub active: bool,
    pub options: Vec<String>,
}

/// Payload for creating or replacing a definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDraft {
    pub field_key: String,
    pub field_name: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

fn default_active() -> bool {
    true
}

/// Checks a draft's machine name before it goes to the backend.
///
/// The backend enforces this too; the client-side check exists so the admin
/// form can reject the draft without a round trip.
pub fn validate_field_key(key: &str) -> Result<(), FieldError> {
    let pattern = regex::Regex::new("^[a-z][a-z0-9_]*$").expect("field key pattern is valid");
    if key.is_empty() {
        return Err(FieldError::InvalidFieldKey {
            key: key.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if !pattern.is_match(key) {
        return Err(FieldError::InvalidFieldKey {
            key: key.to_string(),
            reason: "must match ^[a-z][a-z0-9_]*$".to_string(),
        });
    }
    Ok(())
}

/// Normalizes a list of raw definition entries.
///
/// Entries without a `fieldKey` are dropped; they cannot be addressed and
/// would shadow nothing.
pub fn normalize_definitions(entity: EntityType, raw: Vec<Value>) -> Vec<FieldDefinition> {
    raw.iter()
        .filter_map(|entry| normalize_definition(entity, entry))
        .collect()
}

/// Normalizes one raw definition entry; `None` when `fieldKey` is missing.
pub fn normalize_definition(entity: EntityType, entry: &Value) -> Option<FieldDefinition> {
    let field_key = entry
        .get("fieldKey")
        .and_then(Value::as_str)
        .filter(|k| !k.is_empty())?
        .to_string();

    let field_type = FieldType::from_raw(entry.get("fieldType").and_then(Value::as_str));

    let options = if field_type == FieldType::Dropdown {
        parse_options(entry.get("optionsJson"))
    } else {
        Vec::new()
    };

    Some(FieldDefinition {
        id: scalar_to_string(entry.get("id")),
        entity_type: entity,
        field_name: entry
            .get("fieldName")
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
            .unwrap_or(&field_key)
            .to_string(),
        field_key,
        field_type,
        required: entry.get("required").and_then(Value::as_bool).unwrap_or(false),
        active: entry.get("active").and_then(Value::as_bool).unwrap_or(true),
        options,
    })
}

/// Dropdown options arrive as a JSON array or as a string containing JSON.
fn parse_options(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(encoded)) => serde_json::from_str(encoded).unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn scalar_to_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_keys_round_trip() {
        for entity in EntityType::ALL {
            assert_eq!(EntityType::from_key(entity.key()).unwrap(), entity);
        }
        assert!(matches!(
            EntityType::from_key("invoice"),
            Err(FieldError::UnknownEntityType(_))
        ));
    }

    #[test]
    fn test_entity_paths() {
        assert_eq!(EntityType::Product.definitions_path(), "product-fields");
        assert_eq!(EntityType::Deal.values_path("42"), "deals/42/fields");
    }

    #[test]
    fn test_field_type_normalization() {
        assert_eq!(FieldType::from_raw(Some("text")), FieldType::Text);
        assert_eq!(FieldType::from_raw(Some("DROPDOWN")), FieldType::Dropdown);
        assert_eq!(FieldType::from_raw(Some("Number")), FieldType::Number);
        assert_eq!(FieldType::from_raw(Some("GEOPOINT")), FieldType::Text);
        assert_eq!(FieldType::from_raw(None), FieldType::Text);
    }

    #[test]
    fn test_normalize_lowercase_type_and_defaults() {
        let raw = vec![json!({"fieldKey": "x", "fieldType": "text"})];
        let defs = normalize_definitions(EntityType::Product, raw);

        assert_eq!(defs.len(), 1);
        let def = &defs[0];
        assert_eq!(def.field_type, FieldType::Text);
        assert!(!def.required);
        assert!(def.active);
        assert!(def.options.is_empty());
        // A missing label falls back to the machine name.
        assert_eq!(def.field_name, "x");
    }

    #[test]
    fn test_entries_without_field_key_are_dropped() {
        let raw = vec![
            json!({"fieldName": "No key"}),
            json!({"fieldKey": "", "fieldName": "Empty key"}),
            json!({"fieldKey": "kept"}),
        ];
        let defs = normalize_definitions(EntityType::Bank, raw);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].field_key, "kept");
    }

    #[test]
    fn test_dropdown_options_from_array() {
        let raw = vec![json!({
            "fieldKey": "tier",
            "fieldType": "DROPDOWN",
            "optionsJson": ["A", "B"]
        })];
        let defs = normalize_definitions(EntityType::Deal, raw);
        assert_eq!(defs[0].options, vec!["A", "B"]);
    }

    #[test]
    fn test_dropdown_options_from_encoded_string() {
        let raw = vec![json!({
            "fieldKey": "tier",
            "fieldType": "DROPDOWN",
            "optionsJson": "[\"A\",\"B\"]"
        })];
        let defs = normalize_definitions(EntityType::Deal, raw);
        assert_eq!(defs[0].options, vec!["A", "B"]);
    }

    #[test]
    fn test_options_ignored_for_non_dropdown() {
        let raw = vec![json!({
            "fieldKey": "weight",
            "fieldType": "NUMBER",
            "optionsJson": ["stray"]
        })];
        let defs = normalize_definitions(EntityType::Product, raw);
        assert!(defs[0].options.is_empty());
    }

    #[test]
    fn test_numeric_id_becomes_string() {
        let raw = vec![json!({"fieldKey": "k", "id": 17})];
        let defs = normalize_definitions(EntityType::Product, raw);
        assert_eq!(defs[0].id, "17");
    }

    #[test]
    fn test_validate_field_key() {
        assert!(validate_field_key("weight_kg").is_ok());
        assert!(validate_field_key("a1").is_ok());
        assert!(validate_field_key("").is_err());
        assert!(validate_field_key("1abc").is_err());
        assert!(validate_field_key("CamelCase").is_err());
        assert!(validate_field_key("has space").is_err());
    }
}
