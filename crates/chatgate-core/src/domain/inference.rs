//! Domain view of the inference-engine contract.
//!
//! These types describe what the gateway sends to and receives from the
//! OpenAI-compatible backend, without committing to its wire format.

use serde::{Deserialize, Serialize};

use super::chat::MessageRole;

/// One turn of the prompt sent to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: MessageRole,
    pub content: String,
}

/// Generation parameters for a completion request.
///
/// When `model` is `None` the adapter falls back to the first model the
/// engine reports.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub model: Option<String>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.7,
            max_tokens: 512,
            top_p: 0.9,
        }
    }
}

/// Token accounting reported by the engine.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
}

/// The normalized result of a non-streaming completion.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub content: String,
    pub model: String,
    pub usage: TokenUsage,
    pub finish_reason: Option<String>,
}
