//! Pure view model mapping a field definition to an input control.
//!
//! One variant per field type, matched exhaustively. The webview renders the
//! control; this side decides which control and what string goes back over
//! the wire. `required` is not enforced here; that is the backend's call.

use chrono::NaiveDate;
use serde::Serialize;

use super::schema::{FieldDefinition, FieldType};

/// Wire format for stored dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldControl {
    /// Boolean toggle; emits the literal strings `"true"` / `"false"`.
    Toggle { on: bool },
    /// Closed choice; the leading empty choice means "unselected".
    Choice { choices: Vec<String>, selected: String },
    /// Calendar date constrained to `YYYY-MM-DD`.
    DatePicker { value: String },
    /// Numeric text entry; the raw text is transmitted untouched.
    NumberEntry { value: String },
    /// Free text, also the fallback for unknown field types.
    TextEntry { value: String },
}

impl FieldControl {
    pub fn for_definition(definition: &FieldDefinition, current: &str) -> FieldControl {
        match definition.field_type {
            FieldType::Boolean => FieldControl::Toggle { on: current == "true" },
            FieldType::Dropdown => {
                let mut choices = Vec::with_capacity(definition.options.len() + 1);
                choices.push(String::new());
                choices.extend(definition.options.iter().cloned());

                let selected = if definition.options.iter().any(|o| o == current) {
                    current.to_string()
                } else {
                    String::new()
                };
                FieldControl::Choice { choices, selected }
            }
            FieldType::Date => FieldControl::DatePicker {
                value: coerce_date(current),
            },
            FieldType::Number => FieldControl::NumberEntry {
                value: current.to_string(),
            },
            FieldType::Text => FieldControl::TextEntry {
                value: current.to_string(),
            },
        }
    }
}

/// Coerces an edited value to the string form the backend stores.
pub fn coerce_input(definition: &FieldDefinition, raw: &str) -> String {
    match definition.field_type {
        FieldType::Boolean => {
            if raw == "true" {
                "true".to_string()
            } else {
                "false".to_string()
            }
        }
        FieldType::Date => coerce_date(raw),
        FieldType::Dropdown => {
            if definition.options.iter().any(|o| o == raw) {
                raw.to_string()
            } else {
                String::new()
            }
        }
        FieldType::Number | FieldType::Text => raw.to_string(),
    }
}

fn coerce_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(_) => raw.to_string(),
        Err(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::schema::EntityType;

    fn definition(field_type: FieldType, options: &[&str]) -> FieldDefinition {
        FieldDefinition {
            id: "1".to_string(),
            entity_type: EntityType::Deal,
            field_key: "k".to_string(),
            field_name: "K".to_string(),
            field_type,
            required: false,
            active: true,
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }

    #[test]
    fn test_unknown_type_falls_back_to_text_entry() {
        // A raw type outside the enumeration normalizes to Text upstream;
        // Text renders the free-text control.
        assert_eq!(FieldType::from_raw(Some("GEOPOINT")), FieldType::Text);
        let control = FieldControl::for_definition(&definition(FieldType::Text, &[]), "hello");
        assert_eq!(control, FieldControl::TextEntry { value: "hello".to_string() });
    }

    #[test]
    fn test_dropdown_offers_empty_plus_options() {
        let def = definition(FieldType::Dropdown, &["A", "B"]);
        let control = FieldControl::for_definition(&def, "B");
        assert_eq!(
            control,
            FieldControl::Choice {
                choices: vec!["".to_string(), "A".to_string(), "B".to_string()],
                selected: "B".to_string(),
            }
        );
    }

    #[test]
    fn test_dropdown_unknown_current_is_unselected() {
        let def = definition(FieldType::Dropdown, &["A", "B"]);
        let control = FieldControl::for_definition(&def, "Z");
        assert!(matches!(control, FieldControl::Choice { selected, .. } if selected.is_empty()));
    }

    #[test]
    fn test_toggle_reads_literal_true() {
        let def = definition(FieldType::Boolean, &[]);
        assert_eq!(FieldControl::for_definition(&def, "true"), FieldControl::Toggle { on: true });
        assert_eq!(FieldControl::for_definition(&def, "TRUE"), FieldControl::Toggle { on: false });
        assert_eq!(FieldControl::for_definition(&def, ""), FieldControl::Toggle { on: false });
    }

    #[test]
    fn test_coerce_boolean() {
        let def = definition(FieldType::Boolean, &[]);
        assert_eq!(coerce_input(&def, "true"), "true");
        assert_eq!(coerce_input(&def, "yes"), "false");
    }

    #[test]
    fn test_coerce_date() {
        let def = definition(FieldType::Date, &[]);
        assert_eq!(coerce_input(&def, "2026-02-28"), "2026-02-28");
        assert_eq!(coerce_input(&def, "2026-02-30"), "");
        assert_eq!(coerce_input(&def, "28/02/2026"), "");
        assert_eq!(coerce_input(&def, ""), "");
    }

    #[test]
    fn test_coerce_dropdown_membership() {
        let def = definition(FieldType::Dropdown, &["A", "B"]);
        assert_eq!(coerce_input(&def, "A"), "A");
        assert_eq!(coerce_input(&def, "C"), "");
    }

    #[test]
    fn test_number_and_text_pass_through() {
        assert_eq!(coerce_input(&definition(FieldType::Number, &[]), "12.5"), "12.5");
        assert_eq!(coerce_input(&definition(FieldType::Text, &[]), "  raw  "), "  raw  ");
    }
}
