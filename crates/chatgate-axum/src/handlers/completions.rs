//! Chat completion and legacy completion handlers.
//!
//! Both handlers validate generation parameters before the inference
//! client is touched, and answer 503 when no client was initialized at
//! bootstrap. The streaming path emits `data:` lines terminated by a
//! `data: [DONE]` sentinel; a mid-stream failure aborts the body without
//! the sentinel, which is the only truncation signal the protocol has.

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use futures_util::{StreamExt, stream};

use chatgate_core::domain::chat::{MessageRole, NewMessage};
use chatgate_core::ports::inference::InferenceClient;

use crate::dto::completion::{
    ChatCompletionRequest, ChatCompletionResponse, CompletionRequest, CompletionResponse,
};
use crate::error::HttpError;
use crate::state::AppState;

fn require_client(state: &AppState) -> Result<Arc<dyn InferenceClient>, HttpError> {
    state.inference.clone().ok_or_else(|| {
        HttpError::ServiceUnavailable("Inference client not initialized".into())
    })
}

/// POST /v1/chat/completions.
///
/// With `stream=true` the response is a `text/event-stream` and nothing is
/// persisted. Otherwise, when `session_id` names an existing chat, the last
/// user turn and the assistant reply are appended to it.
pub async fn chat_completion(
    State(state): State<AppState>,
    Json(req): Json<ChatCompletionRequest>,
) -> Result<Response, HttpError> {
    req.validate().map_err(HttpError::Validation)?;
    let client = require_client(&state)?;

    // Resolve the session before spending tokens on a doomed request.
    if let Some(session_id) = &req.session_id
        && state.chat_history.get_chat(session_id, false).await?.is_none()
    {
        return Err(HttpError::NotFound(format!("Chat not found: {session_id}")));
    }

    let messages = req.prompt_messages();
    let params = req.generation_params();
    let started = Instant::now();

    if req.stream {
        let fragments = client.chat_completion_stream(messages, params).await?;
        let body = fragments
            .map(|fragment| match fragment {
                Ok(text) => Ok(Bytes::from(format!("data: {text}\n\n"))),
                Err(e) => {
                    tracing::error!(error = %e, "completion stream failed mid-response");
                    Err(std::io::Error::other(e))
                }
            })
            .chain(stream::once(async {
                Ok(Bytes::from_static(b"data: [DONE]\n\n"))
            }));

        let response = Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "text/event-stream")
            .header(header::CACHE_CONTROL, "no-cache")
            .header(header::CONNECTION, "keep-alive")
            .body(Body::from_stream(body))
            .map_err(|e| HttpError::Internal(e.to_string()))?;
        return Ok(response);
    }

    let outcome = client.chat_completion(messages, params).await?;

    if let Some(session_id) = &req.session_id {
        if let Some(user_content) = req.last_user_content() {
            state
                .chat_history
                .add_message(NewMessage::plain(
                    session_id.clone(),
                    MessageRole::User,
                    user_content,
                ))
                .await?;
        }
        state
            .chat_history
            .add_message(NewMessage {
                chat_id: session_id.clone(),
                role: MessageRole::Assistant,
                content: outcome.content.clone(),
                prompt_tokens: Some(outcome.usage.prompt_tokens),
                completion_tokens: Some(outcome.usage.completion_tokens),
                total_tokens: Some(outcome.usage.total_tokens),
                finish_reason: outcome.finish_reason.clone(),
            })
            .await?;
    }

    tracing::info!(
        model = %outcome.model,
        elapsed_ms = started.elapsed().as_millis() as u64,
        persisted = req.session_id.is_some(),
        "chat completion served"
    );

    Ok(Json(ChatCompletionResponse {
        content: outcome.content,
        model: outcome.model,
        usage: outcome.usage,
        finish_reason: outcome.finish_reason,
        created_at: chrono::Utc::now().to_rfc3339(),
        session_id: req.session_id,
    })
    .into_response())
}

/// POST /v1/completions - legacy raw-prompt completion.
pub async fn completion(
    State(state): State<AppState>,
    Json(req): Json<CompletionRequest>,
) -> Result<Json<CompletionResponse>, HttpError> {
    req.validate().map_err(HttpError::Validation)?;
    let client = require_client(&state)?;

    let started = Instant::now();
    let params = req.generation_params();
    let outcome = client.completion(req.prompt, params).await?;

    tracing::info!(
        model = %outcome.model,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "completion served"
    );

    Ok(Json(CompletionResponse {
        content: outcome.content,
        model: outcome.model,
        usage: outcome.usage,
        created_at: chrono::Utc::now().to_rfc3339(),
    }))
}
