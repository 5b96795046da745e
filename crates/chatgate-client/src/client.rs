//! The reqwest-backed inference client.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::{StreamExt, future, stream};
use tracing::{debug, warn};

use chatgate_core::domain::inference::{
    CompletionOutcome, GenerationParams, PromptMessage, TokenUsage,
};
use chatgate_core::ports::inference::{FragmentStream, InferenceClient, InferenceError};

use crate::sse::SseDecoder;
use crate::wire;

/// Inference client speaking the OpenAI REST contract over HTTP.
///
/// One instance is constructed at startup and shared read-only across
/// requests. Every outbound call carries the fixed request timeout.
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    /// Create a client for the engine at `base_url` (including the `/v1`
    /// prefix), with a fixed per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InferenceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| InferenceError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Resolve the model to use: the explicit request value, or the first
    /// model the engine reports.
    async fn resolve_model(&self, requested: Option<String>) -> Result<String, InferenceError> {
        if let Some(model) = requested {
            return Ok(model);
        }
        self.list_models()
            .await?
            .into_iter()
            .next()
            .ok_or(InferenceError::NoModels)
    }

    async fn send_json(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<reqwest::Response, InferenceError> {
        let response = self
            .http
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|e| InferenceError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(InferenceError::Upstream(format!(
                "engine returned {status}: {detail}"
            )));
        }
        Ok(response)
    }
}

fn wire_messages(messages: Vec<PromptMessage>) -> Vec<wire::ChatMessage> {
    messages
        .into_iter()
        .map(|msg| wire::ChatMessage {
            role: msg.role.as_str().to_string(),
            content: msg.content,
        })
        .collect()
}

fn usage_from_wire(usage: Option<wire::Usage>) -> TokenUsage {
    let usage = usage.unwrap_or_default();
    TokenUsage {
        prompt_tokens: usage.prompt_tokens,
        completion_tokens: usage.completion_tokens,
        total_tokens: usage.total_tokens,
    }
}

#[async_trait]
impl InferenceClient for OpenAiClient {
    async fn list_models(&self) -> Result<Vec<String>, InferenceError> {
        let response = self
            .http
            .get(self.endpoint("/models"))
            .send()
            .await
            .map_err(|e| InferenceError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InferenceError::Upstream(format!(
                "engine returned {status} for model listing"
            )));
        }

        let models: wire::ModelsResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::Decode(e.to_string()))?;

        Ok(models.data.into_iter().map(|model| model.id).collect())
    }

    async fn chat_completion(
        &self,
        messages: Vec<PromptMessage>,
        params: GenerationParams,
    ) -> Result<CompletionOutcome, InferenceError> {
        let model = self.resolve_model(params.model).await?;
        let request = wire::ChatCompletionRequest {
            model,
            messages: wire_messages(messages),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            top_p: params.top_p,
            stream: false,
        };

        let response: wire::ChatCompletionResponse = self
            .send_json("/chat/completions", &request)
            .await?
            .json()
            .await
            .map_err(|e| InferenceError::Decode(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| InferenceError::Decode("response carried no choices".into()))?;

        Ok(CompletionOutcome {
            content: choice.message.content,
            model: response.model,
            usage: usage_from_wire(response.usage),
            finish_reason: choice.finish_reason,
        })
    }

    async fn chat_completion_stream(
        &self,
        messages: Vec<PromptMessage>,
        params: GenerationParams,
    ) -> Result<FragmentStream, InferenceError> {
        let model = self.resolve_model(params.model).await?;
        let request = wire::ChatCompletionRequest {
            model,
            messages: wire_messages(messages),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            top_p: params.top_p,
            stream: true,
        };

        let response = self.send_json("/chat/completions", &request).await?;
        debug!("streaming completion started");

        let fragments = response
            .bytes_stream()
            .scan(SseDecoder::new(), |decoder, chunk| {
                let items: Vec<Result<String, InferenceError>> = match chunk {
                    Ok(bytes) => decoder.feed(&bytes).into_iter().map(Ok).collect(),
                    Err(e) => {
                        warn!(error = %e, "stream transport failed");
                        vec![Err(InferenceError::Upstream(e.to_string()))]
                    }
                };
                if decoder.is_done() && items.is_empty() {
                    future::ready(None)
                } else {
                    future::ready(Some(stream::iter(items)))
                }
            })
            .flatten();

        Ok(Box::pin(fragments))
    }

    async fn completion(
        &self,
        prompt: String,
        params: GenerationParams,
    ) -> Result<CompletionOutcome, InferenceError> {
        let model = self.resolve_model(params.model).await?;
        let request = wire::CompletionRequest {
            model,
            prompt,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response: wire::CompletionResponse = self
            .send_json("/completions", &request)
            .await?
            .json()
            .await
            .map_err(|e| InferenceError::Decode(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| InferenceError::Decode("response carried no choices".into()))?;

        Ok(CompletionOutcome {
            content: choice.text,
            model: response.model,
            usage: usage_from_wire(response.usage),
            finish_reason: choice.finish_reason,
        })
    }

    async fn health_check(&self) -> bool {
        match self.list_models().await {
            Ok(models) => !models.is_empty(),
            Err(e) => {
                debug!(error = %e, "health probe failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = OpenAiClient::new("http://localhost:8000/v1/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.endpoint("/models"), "http://localhost:8000/v1/models");
    }
}
