//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the HTTP adapter. All concrete implementations are instantiated here.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use chatgate_client::OpenAiClient;
use chatgate_core::ports::inference::InferenceClient;
use chatgate_core::ports::llm_config::LlmConfigRepository;
use chatgate_core::services::ChatHistoryService;
use chatgate_core::settings::Settings;
use chatgate_db::{SqliteChatHistoryRepository, SqliteLlmConfigRepository, setup_database};

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

impl CorsConfig {
    /// Derive the CORS policy from the configured origin list.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let origins = settings.cors_origins_list();
        if origins.iter().any(|o| o == "*") {
            Self::AllowAll
        } else {
            Self::AllowOrigins(origins)
        }
    }
}

/// Application context for the Axum adapter.
///
/// Holds all initialized services for the web server. `inference` is `None`
/// when the client could not be constructed; affected routes answer 503 and
/// the health probe reports `unhealthy`.
pub struct AxumContext {
    /// Loaded process settings.
    pub settings: Settings,
    /// Chat history service over the SQLite repository.
    pub chat_history: ChatHistoryService,
    /// Generation-preset repository.
    pub llm_configs: Arc<dyn LlmConfigRepository>,
    /// Inference client, absent when construction failed.
    pub inference: Option<Arc<dyn InferenceClient>>,
}

/// Bootstrap the Axum server with all services.
///
/// Creates the database pool (running schema setup), the repositories, and
/// the inference client. A client construction failure is logged, not
/// fatal: the gateway still serves its persistence surface.
pub async fn bootstrap(settings: Settings) -> Result<AxumContext> {
    tracing::info!(
        database_path = %settings.database_path,
        inference_url = %settings.inference_url,
        auth_enabled = settings.enable_auth,
        "bootstrapping gateway"
    );

    let pool = setup_database(Path::new(&settings.database_path)).await?;

    let chat_history = ChatHistoryService::new(Arc::new(SqliteChatHistoryRepository::new(
        pool.clone(),
    )));
    let llm_configs: Arc<dyn LlmConfigRepository> =
        Arc::new(SqliteLlmConfigRepository::new(pool));

    let timeout = Duration::from_secs(settings.request_timeout_secs);
    let inference: Option<Arc<dyn InferenceClient>> =
        match OpenAiClient::new(&settings.inference_url, timeout) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                tracing::error!(error = %e, "inference client unavailable");
                None
            }
        };

    if let Some(client) = &inference {
        if client.health_check().await {
            tracing::info!(url = %settings.inference_url, "inference engine reachable");
        } else {
            tracing::warn!(
                url = %settings.inference_url,
                "inference engine not reachable at startup, requests will be retried per call"
            );
        }
    }

    Ok(AxumContext {
        settings,
        chat_history,
        llm_configs,
        inference,
    })
}

/// Bootstrap and serve until ctrl-c.
pub async fn start_server(settings: Settings) -> Result<()> {
    use tokio::net::TcpListener;

    let addr = format!("{}:{}", settings.host, settings.port);
    let ctx = bootstrap(settings).await?;
    let app = crate::routes::create_router(ctx);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("chatgate listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
    }
}
