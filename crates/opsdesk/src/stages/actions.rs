//! Stage actions: transition requests and the deal timeline.
//!
//! Transitions are requests, not commands: the backend validates legality
//! and records history; the client only refreshes derived state afterwards.

use std::sync::Arc;

use log::debug;
use reqwest::Method;
use serde_json::json;

use super::model::TimelineEvent;
use crate::api::{parse_list, ApiTransport, Result};

pub struct StageActions {
    transport: Arc<dyn ApiTransport>,
}

impl StageActions {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// Asks the backend to move a deal to `new_stage`.
    pub async fn request_transition(
        &self,
        deal_id: &str,
        new_stage: &str,
        department: &str,
    ) -> Result<()> {
        let path = format!("deals/{}/stages", deal_id);
        let body = json!({
            "newStage": new_stage,
            "department": department,
        });
        self.transport
            .request(Method::POST, &path, &[], Some(body))
            .await?;
        debug!("Requested transition of deal {} to '{}'", deal_id, new_stage);
        Ok(())
    }

    /// Fetches a deal's stage history, oldest first as the backend returns it.
    pub async fn deal_timeline(&self, deal_id: &str) -> Result<Vec<TimelineEvent>> {
        let path = format!("deals/{}/timeline", deal_id);
        let payload = self.transport.request(Method::GET, &path, &[], None).await?;
        parse_list(&path, payload)
    }
}
