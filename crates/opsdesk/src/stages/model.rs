//! Stage catalog and timeline wire models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One step of a department's pipeline, as the backend defines it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub stage_code: String,
    #[serde(default)]
    pub stage_name: String,
    #[serde(default)]
    pub stage_order: i32,
    #[serde(default)]
    pub is_terminal: bool,
    #[serde(default)]
    pub department: String,
}

/// One entry of a deal's stage history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub stage_code: String,
    #[serde(default)]
    pub stage_name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub changed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub note: Option<String>,
}
