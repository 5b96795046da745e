//! Inference client port definition.
//!
//! One normalized interface over the OpenAI-compatible REST contract.
//! Implementations are chosen at construction time (real HTTP adapter in
//! production, stubs in tests) - there is no runtime transport sniffing.

use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;
use thiserror::Error;

use crate::domain::inference::{CompletionOutcome, GenerationParams, PromptMessage};

/// Errors reported by the inference client.
#[derive(Debug, Error)]
pub enum InferenceError {
    /// The client could not be constructed from its configuration.
    #[error("Client configuration error: {0}")]
    Configuration(String),

    /// Transport failure or non-success status from the engine. Timeouts
    /// land here too (the adapter applies a fixed request timeout).
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// The engine answered but the payload could not be interpreted.
    #[error("Failed to decode engine response: {0}")]
    Decode(String),

    /// No model was given and the engine reports none available.
    #[error("No models available from the inference engine")]
    NoModels,
}

/// A stream of incremental text fragments from a streaming completion.
///
/// Consumed once, never restartable. The caller is responsible for
/// concatenation and for emitting any terminal sentinel downstream.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, InferenceError>> + Send>>;

/// Port for talking to the OpenAI-compatible inference engine.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// List the model identifiers the engine currently serves.
    async fn list_models(&self) -> Result<Vec<String>, InferenceError>;

    /// Run a non-streaming chat completion.
    async fn chat_completion(
        &self,
        messages: Vec<PromptMessage>,
        params: GenerationParams,
    ) -> Result<CompletionOutcome, InferenceError>;

    /// Run a streaming chat completion, yielding text fragments.
    async fn chat_completion_stream(
        &self,
        messages: Vec<PromptMessage>,
        params: GenerationParams,
    ) -> Result<FragmentStream, InferenceError>;

    /// Run a legacy text completion from a raw prompt.
    async fn completion(
        &self,
        prompt: String,
        params: GenerationParams,
    ) -> Result<CompletionOutcome, InferenceError>;

    /// Liveness heuristic: true iff the engine reports at least one model.
    async fn health_check(&self) -> bool;
}
