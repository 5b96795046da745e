#![allow(dead_code)] // not every test binary uses every helper

//! Shared fixtures for the router integration tests.
//!
//! Tests run against the real router with an in-memory database and a
//! stub inference client, so no network or filesystem is touched.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use futures_util::stream;
use http_body_util::BodyExt;

use chatgate_axum::bootstrap::AxumContext;
use chatgate_axum::routes::create_router;
use chatgate_core::domain::inference::{
    CompletionOutcome, GenerationParams, PromptMessage, TokenUsage,
};
use chatgate_core::ports::inference::{FragmentStream, InferenceClient, InferenceError};
use chatgate_core::services::ChatHistoryService;
use chatgate_core::settings::Settings;
use chatgate_db::{
    SqliteChatHistoryRepository, SqliteLlmConfigRepository, setup_test_database,
};

/// Inference stub with canned replies.
pub struct StubInferenceClient {
    pub reply: String,
    pub fragments: Vec<String>,
    pub models: Vec<String>,
    pub fail: bool,
}

impl Default for StubInferenceClient {
    fn default() -> Self {
        Self {
            reply: "stubbed reply".into(),
            fragments: vec!["Hel".into(), "lo".into()],
            models: vec!["stub-model".into()],
            fail: false,
        }
    }
}

impl StubInferenceClient {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn outcome(&self) -> CompletionOutcome {
        CompletionOutcome {
            content: self.reply.clone(),
            model: "stub-model".into(),
            usage: TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            },
            finish_reason: Some("stop".into()),
        }
    }

    fn check(&self) -> Result<(), InferenceError> {
        if self.fail {
            Err(InferenceError::Upstream("engine exploded".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl InferenceClient for StubInferenceClient {
    async fn list_models(&self) -> Result<Vec<String>, InferenceError> {
        self.check()?;
        Ok(self.models.clone())
    }

    async fn chat_completion(
        &self,
        _messages: Vec<PromptMessage>,
        _params: GenerationParams,
    ) -> Result<CompletionOutcome, InferenceError> {
        self.check()?;
        Ok(self.outcome())
    }

    async fn chat_completion_stream(
        &self,
        _messages: Vec<PromptMessage>,
        _params: GenerationParams,
    ) -> Result<FragmentStream, InferenceError> {
        self.check()?;
        let items: Vec<Result<String, InferenceError>> =
            self.fragments.iter().cloned().map(Ok).collect();
        Ok(Box::pin(stream::iter(items)))
    }

    async fn completion(
        &self,
        _prompt: String,
        _params: GenerationParams,
    ) -> Result<CompletionOutcome, InferenceError> {
        self.check()?;
        Ok(self.outcome())
    }

    async fn health_check(&self) -> bool {
        !self.fail
    }
}

/// Build a context over a fresh in-memory database.
pub async fn test_context(
    settings: Settings,
    inference: Option<Arc<dyn InferenceClient>>,
) -> AxumContext {
    let pool = setup_test_database().await.unwrap();
    AxumContext {
        settings,
        chat_history: ChatHistoryService::new(Arc::new(SqliteChatHistoryRepository::new(
            pool.clone(),
        ))),
        llm_configs: Arc::new(SqliteLlmConfigRepository::new(pool)),
        inference,
    }
}

/// Router with the default stub client.
pub async fn test_app() -> Router {
    let ctx = test_context(
        Settings::default(),
        Some(Arc::new(StubInferenceClient::default())),
    )
    .await;
    create_router(ctx)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
