//! Builders for wire payloads used across registry tests.

#![allow(dead_code)]

use serde_json::{json, Value};

/// Builder for one raw stage entry as the backend returns it.
pub struct StagePayloadBuilder {
    stage_code: String,
    stage_name: String,
    stage_order: i32,
    is_terminal: bool,
    department: String,
}

impl StagePayloadBuilder {
    pub fn new(stage_code: &str, stage_order: i32) -> Self {
        Self {
            stage_code: stage_code.to_string(),
            stage_name: stage_code.to_string(),
            stage_order,
            is_terminal: false,
            department: "sales".to_string(),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.stage_name = name.to_string();
        self
    }

    pub fn terminal(mut self) -> Self {
        self.is_terminal = true;
        self
    }

    pub fn department(mut self, department: &str) -> Self {
        self.department = department.to_string();
        self
    }

    pub fn build(self) -> Value {
        json!({
            "stageCode": self.stage_code,
            "stageName": self.stage_name,
            "stageOrder": self.stage_order,
            "isTerminal": self.is_terminal,
            "department": self.department,
        })
    }
}

/// Shorthand for a non-terminal stage entry.
pub fn stage_entry(code: &str, order: i32) -> Value {
    StagePayloadBuilder::new(code, order).build()
}

/// Builder for one raw field definition entry.
pub struct DefinitionPayloadBuilder {
    entry: serde_json::Map<String, Value>,
}

impl DefinitionPayloadBuilder {
    pub fn new(field_key: &str) -> Self {
        let mut entry = serde_json::Map::new();
        entry.insert("id".to_string(), json!(field_key));
        entry.insert("fieldKey".to_string(), json!(field_key));
        entry.insert("fieldName".to_string(), json!(field_key));
        Self { entry }
    }

    pub fn field_type(mut self, field_type: &str) -> Self {
        self.entry.insert("fieldType".to_string(), json!(field_type));
        self
    }

    pub fn required(mut self) -> Self {
        self.entry.insert("required".to_string(), json!(true));
        self
    }

    pub fn inactive(mut self) -> Self {
        self.entry.insert("active".to_string(), json!(false));
        self
    }

    pub fn options(mut self, options: &[&str]) -> Self {
        self.entry.insert("optionsJson".to_string(), json!(options));
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.entry)
    }
}

/// One raw field value entry.
pub fn value_entry(field_key: &str, value: Value) -> Value {
    json!({"fieldKey": field_key, "value": value})
}
