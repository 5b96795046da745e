//! Root banner, health probe, and model listing handlers.

use axum::Json;
use axum::extract::State;

use chatgate_core::settings::APP_NAME;

use crate::dto::system::{HealthResponse, HealthStatus, ModelsResponse, RootResponse};
use crate::error::HttpError;
use crate::state::AppState;

/// GET / - service banner with endpoint map.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        name: APP_NAME,
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
        endpoints: serde_json::json!({
            "health": "/health",
            "models": "/v1/models",
            "chat_completions": "/v1/chat/completions",
            "completions": "/v1/completions",
            "chats": "/v1/chats",
            "llm_configs": "/v1/llm-configs",
        }),
    })
}

/// GET /health - probe the inference engine.
///
/// Always answers 200. `unhealthy` means the client was never
/// initialized; `degraded` means the engine probe failed or reported no
/// models.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, connected, models) = match &state.inference {
        None => (HealthStatus::Unhealthy, false, Vec::new()),
        Some(client) => match client.list_models().await {
            Ok(models) if !models.is_empty() => (HealthStatus::Healthy, true, models),
            Ok(_) => (HealthStatus::Degraded, true, Vec::new()),
            Err(e) => {
                tracing::debug!(error = %e, "health probe failed");
                (HealthStatus::Degraded, false, Vec::new())
            }
        },
    };

    Json(HealthResponse {
        status,
        vllm_connected: connected,
        available_models: models,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /v1/models - list models in the OpenAI shape.
pub async fn models(State(state): State<AppState>) -> Result<Json<ModelsResponse>, HttpError> {
    let client = state.inference.as_ref().ok_or_else(|| {
        HttpError::ServiceUnavailable("Inference client not initialized".into())
    })?;

    let ids = client.list_models().await?;
    Ok(Json(ModelsResponse::from_ids(ids)))
}
