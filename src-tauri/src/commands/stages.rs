//! Department, stage catalog, and pipeline commands.

use std::sync::Arc;

use opsdesk::stages::{PipelineView, Stage, TimelineEvent};
use serde::Serialize;
use tauri::State;
use tokio::sync::RwLock;

use super::ApiResponse;
use crate::state::AppState;

/// Derived description of one stage, for deal cards and list rows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageSummary {
    pub stage_code: String,
    pub stage_name: String,
    pub stage_order: i32,
    pub is_terminal: bool,
}

#[tauri::command]
pub async fn get_departments(
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<Vec<String>>, String> {
    let state = state.read().await;
    // Failures degrade to an empty list inside the registry; the error, if
    // any, rides along for the frontend banner.
    let departments = state.stages.fetch_departments().await;

    match state.stages.last_error() {
        Some(error) if departments.is_empty() => Ok(ApiResponse {
            success: true,
            data: Some(departments),
            error: Some(error),
        }),
        _ => Ok(ApiResponse::ok(departments)),
    }
}

#[tauri::command]
pub async fn get_stages(
    department: String,
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<Vec<Stage>>, String> {
    let state = state.read().await;
    let stages = state.stages.stages_for_department(&department).await;
    Ok(ApiResponse::ok(stages.to_vec()))
}

/// Builds the pipeline widget model for a deal.
#[tauri::command]
pub async fn get_pipeline(
    department: String,
    current_stage: Option<String>,
    disabled: Option<bool>,
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<PipelineView>, String> {
    let state = state.read().await;
    let stages = state.stages.stages_for_department(&department).await;

    let view = PipelineView::build(&stages, current_stage.as_deref(), disabled.unwrap_or(false));
    Ok(ApiResponse::ok(view))
}

/// Derived lookups for one stage; sane defaults when nothing is cached yet.
#[tauri::command]
pub async fn describe_stage(
    department: String,
    stage_code: String,
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<StageSummary>, String> {
    let state = state.read().await;

    Ok(ApiResponse::ok(StageSummary {
        stage_name: state.stages.stage_name(&department, &stage_code),
        stage_order: state.stages.stage_order(&department, &stage_code),
        is_terminal: state.stages.is_terminal(&department, &stage_code),
        stage_code,
    }))
}

#[tauri::command]
pub async fn request_stage_transition(
    deal_id: String,
    new_stage: String,
    department: String,
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<()>, String> {
    let state = state.read().await;

    // The only client-side restriction: terminal stages are not offered as
    // targets. Everything else is the backend's call.
    if state.stages.is_terminal(&department, &new_stage) {
        return Ok(ApiResponse::err(format!(
            "Stage '{}' is terminal and cannot be a transition target",
            new_stage
        )));
    }

    match state
        .stage_actions
        .request_transition(&deal_id, &new_stage, &department)
        .await
    {
        Ok(()) => {
            let label = state.stages.stage_name(&department, &new_stage);
            state.toasts.success(format!("Deal moved to {}", label));
            Ok(ApiResponse::ok(()))
        }
        Err(e) => {
            state.toasts.error(format!("Stage transition failed: {}", e));
            Ok(ApiResponse::err(e.to_string()))
        }
    }
}

#[tauri::command]
pub async fn get_deal_timeline(
    deal_id: String,
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<Vec<TimelineEvent>>, String> {
    let state = state.read().await;

    match state.stage_actions.deal_timeline(&deal_id).await {
        Ok(events) => Ok(ApiResponse::ok(events)),
        Err(e) => {
            state.toasts.error(format!("Failed to load deal timeline: {}", e));
            Ok(ApiResponse::err(e.to_string()))
        }
    }
}
