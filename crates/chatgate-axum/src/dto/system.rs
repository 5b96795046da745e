//! Service-level DTOs: root banner, health, model listing.

use serde::Serialize;

/// Response for `GET /`.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub endpoints: serde_json::Value,
}

/// Overall health of the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Engine reachable and serving at least one model.
    Healthy,
    /// Client constructed but the engine probe failed.
    Degraded,
    /// Inference client was never initialized.
    Unhealthy,
}

/// Response for `GET /health`. Always 200, never an error status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub vllm_connected: bool,
    pub available_models: Vec<String>,
    pub timestamp: String,
}

/// OpenAI-shaped model listing for `GET /v1/models`.
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub object: &'static str,
    pub data: Vec<ModelEntry>,
}

#[derive(Debug, Serialize)]
pub struct ModelEntry {
    pub id: String,
    pub object: &'static str,
}

impl ModelsResponse {
    #[must_use]
    pub fn from_ids(ids: Vec<String>) -> Self {
        Self {
            object: "list",
            data: ids
                .into_iter()
                .map(|id| ModelEntry {
                    id,
                    object: "model",
                })
                .collect(),
        }
    }
}
