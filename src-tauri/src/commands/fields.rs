//! Field definition and record value commands.
//!
//! Entity types arrive from the webview as strings; resolving them through
//! `EntityType::from_key` is what surfaces `UnknownEntityType` to the
//! frontend. CRUD failures are toasted and returned so the admin form stays
//! in its pre-submit state for retry.

use std::collections::HashMap;
use std::sync::Arc;

use opsdesk::fields::{EntityType, FieldControl, FieldDefinition, FieldDraft};
use serde::Serialize;
use tauri::State;
use tokio::sync::RwLock;

use super::ApiResponse;
use crate::state::AppState;

/// One row of a record's custom-field form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldFormEntry {
    pub definition: FieldDefinition,
    pub control: FieldControl,
}

fn resolve_entity<T>(key: &str) -> Result<EntityType, ApiResponse<T>> {
    EntityType::from_key(key).map_err(|e| ApiResponse::err(e.to_string()))
}

#[tauri::command]
pub async fn list_field_definitions(
    entity: String,
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<Vec<FieldDefinition>>, String> {
    let state = state.read().await;
    let entity = match resolve_entity(&entity) {
        Ok(entity) => entity,
        Err(response) => return Ok(response),
    };

    match state.fields.fetch_definitions(entity).await {
        Ok(definitions) => Ok(ApiResponse::ok(definitions)),
        Err(e) => {
            state.toasts.error(format!("Failed to load field definitions: {}", e));
            Ok(ApiResponse::err(e.to_string()))
        }
    }
}

#[tauri::command]
pub async fn create_field_definition(
    entity: String,
    draft: FieldDraft,
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<FieldDefinition>, String> {
    let state = state.read().await;
    let entity = match resolve_entity(&entity) {
        Ok(entity) => entity,
        Err(response) => return Ok(response),
    };

    match state.fields.create_definition(entity, &draft).await {
        Ok(definition) => {
            state
                .toasts
                .success(format!("Field '{}' created", definition.field_name));
            Ok(ApiResponse::ok(definition))
        }
        Err(e) => {
            state.toasts.error(format!("Failed to create field: {}", e));
            Ok(ApiResponse::err(e.to_string()))
        }
    }
}

#[tauri::command]
pub async fn update_field_definition(
    entity: String,
    id: String,
    draft: FieldDraft,
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<FieldDefinition>, String> {
    let state = state.read().await;
    let entity = match resolve_entity(&entity) {
        Ok(entity) => entity,
        Err(response) => return Ok(response),
    };

    match state.fields.update_definition(entity, &id, &draft).await {
        Ok(definition) => Ok(ApiResponse::ok(definition)),
        Err(e) => {
            state.toasts.error(format!("Failed to update field: {}", e));
            Ok(ApiResponse::err(e.to_string()))
        }
    }
}

#[tauri::command]
pub async fn delete_field_definition(
    entity: String,
    id: String,
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<()>, String> {
    let state = state.read().await;
    let entity = match resolve_entity(&entity) {
        Ok(entity) => entity,
        Err(response) => return Ok(response),
    };

    match state.fields.delete_definition(entity, &id).await {
        Ok(()) => Ok(ApiResponse::ok(())),
        Err(e) => {
            state.toasts.error(format!("Failed to delete field: {}", e));
            Ok(ApiResponse::err(e.to_string()))
        }
    }
}

#[tauri::command]
pub async fn get_record_fields(
    entity: String,
    record_id: String,
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<HashMap<String, String>>, String> {
    let state = state.read().await;
    let entity = match resolve_entity(&entity) {
        Ok(entity) => entity,
        Err(response) => return Ok(response),
    };

    match state.fields.fetch_values(entity, &record_id).await {
        Ok(values) => Ok(ApiResponse::ok(values)),
        Err(e) => {
            state.toasts.error(format!("Failed to load record fields: {}", e));
            Ok(ApiResponse::err(e.to_string()))
        }
    }
}

#[tauri::command]
pub async fn upsert_record_field(
    entity: String,
    record_id: String,
    field_key: String,
    value: Option<String>,
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<()>, String> {
    let state = state.read().await;
    let entity = match resolve_entity(&entity) {
        Ok(entity) => entity,
        Err(response) => return Ok(response),
    };

    match state
        .fields
        .upsert_value(entity, &record_id, &field_key, value.as_deref())
        .await
    {
        Ok(()) => Ok(ApiResponse::ok(())),
        Err(e) => {
            state.toasts.error(format!("Failed to save field value: {}", e));
            Ok(ApiResponse::err(e.to_string()))
        }
    }
}

/// Builds a record's custom-field form: active definitions paired with the
/// control the webview should render for each.
#[tauri::command]
pub async fn get_field_form(
    entity: String,
    record_id: String,
    state: State<'_, Arc<RwLock<AppState>>>,
) -> Result<ApiResponse<Vec<FieldFormEntry>>, String> {
    let state = state.read().await;
    let entity = match resolve_entity(&entity) {
        Ok(entity) => entity,
        Err(response) => return Ok(response),
    };

    let definitions = match state.fields.fetch_definitions(entity).await {
        Ok(definitions) => definitions,
        Err(e) => {
            state.toasts.error(format!("Failed to load field definitions: {}", e));
            return Ok(ApiResponse::err(e.to_string()));
        }
    };

    let values = match state.fields.fetch_values(entity, &record_id).await {
        Ok(values) => values,
        Err(e) => {
            state.toasts.error(format!("Failed to load record fields: {}", e));
            return Ok(ApiResponse::err(e.to_string()));
        }
    };

    let form = definitions
        .into_iter()
        .filter(|definition| definition.active)
        .map(|definition| {
            let current = values
                .get(&definition.field_key)
                .map(String::as_str)
                .unwrap_or("");
            let control = FieldControl::for_definition(&definition, current);
            FieldFormEntry { definition, control }
        })
        .collect();

    Ok(ApiResponse::ok(form))
}
