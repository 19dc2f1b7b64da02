//! Dynamic field definitions: admin-authored schemas and per-record values.

pub mod control;
pub mod error;
pub mod registry;
pub mod schema;

pub use control::{coerce_input, FieldControl};
pub use error::FieldError;
pub use registry::FieldRegistry;
pub use schema::{normalize_definitions, EntityType, FieldDefinition, FieldDraft, FieldType};
