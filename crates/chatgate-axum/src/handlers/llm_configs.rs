//! Generation-preset CRUD handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};

use chatgate_core::domain::llm_config::LlmConfig;

use crate::dto::chat::DeleteResponse;
use crate::dto::llm_config::CreateLlmConfigRequest;
use crate::error::HttpError;
use crate::state::AppState;

/// POST /v1/llm-configs - create a named preset.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateLlmConfigRequest>,
) -> Result<impl IntoResponse, HttpError> {
    req.validate().map_err(HttpError::Validation)?;
    let config = state.llm_configs.create(req.into()).await?;
    tracing::info!(name = %config.name, "llm config created");
    Ok((StatusCode::CREATED, Json(config)))
}

/// GET /v1/llm-configs - all presets, ordered by name.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<LlmConfig>>, HttpError> {
    Ok(Json(state.llm_configs.list().await?))
}

/// GET /v1/llm-configs/{id}.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<LlmConfig>, HttpError> {
    let config = state
        .llm_configs
        .get(id)
        .await?
        .ok_or_else(|| HttpError::NotFound(format!("LLM config {id} not found")))?;
    Ok(Json(config))
}

/// DELETE /v1/llm-configs/{id}.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, HttpError> {
    if !state.llm_configs.delete(id).await? {
        return Err(HttpError::NotFound(format!("LLM config {id} not found")));
    }
    Ok(Json(DeleteResponse {
        message: format!("LLM config {id} deleted"),
    }))
}
