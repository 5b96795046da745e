//! Completion request and response DTOs.
//!
//! Generation parameters carry the engine defaults and are range-checked
//! before any inference call: temperature in [0, 2], top_p in [0, 1],
//! max_tokens in [1, 4096]. Violations answer 422 without touching the
//! engine.

use serde::{Deserialize, Serialize};

use chatgate_core::domain::chat::MessageRole;
use chatgate_core::domain::inference::{GenerationParams, PromptMessage, TokenUsage};

pub(crate) fn default_temperature() -> f64 {
    0.7
}

pub(crate) fn default_top_p() -> f64 {
    0.9
}

pub(crate) fn default_max_tokens() -> u32 {
    512
}

pub(crate) fn check_ranges(
    temperature: f64,
    top_p: f64,
    max_tokens: i64,
) -> Result<(), String> {
    if !(0.0..=2.0).contains(&temperature) {
        return Err(format!("temperature must be in [0, 2], got {temperature}"));
    }
    if !(0.0..=1.0).contains(&top_p) {
        return Err(format!("top_p must be in [0, 1], got {top_p}"));
    }
    if !(1..=4096).contains(&max_tokens) {
        return Err(format!("max_tokens must be in [1, 4096], got {max_tokens}"));
    }
    Ok(())
}

/// One incoming prompt turn.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub role: MessageRole,
    pub content: String,
}

/// Request body for `POST /v1/chat/completions`.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionRequest {
    pub messages: Vec<IncomingMessage>,
    pub model: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default)]
    pub stream: bool,
    /// Chat to persist the exchange into. Must already exist.
    pub session_id: Option<String>,
}

impl ChatCompletionRequest {
    /// Range-check the generation parameters and the message list.
    pub fn validate(&self) -> Result<(), String> {
        if self.messages.is_empty() {
            return Err("messages must not be empty".into());
        }
        check_ranges(self.temperature, self.top_p, i64::from(self.max_tokens))
    }

    /// The prompt as sent to the engine.
    #[must_use]
    pub fn prompt_messages(&self) -> Vec<PromptMessage> {
        self.messages
            .iter()
            .map(|msg| PromptMessage {
                role: msg.role,
                content: msg.content.clone(),
            })
            .collect()
    }

    /// The generation parameters as sent to the engine.
    #[must_use]
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: self.top_p,
        }
    }

    /// The content of the most recent user turn, if any. This is the
    /// message persisted when a session is attached.
    #[must_use]
    pub fn last_user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|msg| msg.role == MessageRole::User)
            .map(|msg| msg.content.as_str())
    }
}

/// Response body for a non-streaming chat completion.
#[derive(Debug, Serialize)]
pub struct ChatCompletionResponse {
    pub content: String,
    pub model: String,
    pub usage: TokenUsage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Request body for `POST /v1/completions`.
#[derive(Debug, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
    pub model: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn validate(&self) -> Result<(), String> {
        check_ranges(self.temperature, default_top_p(), i64::from(self.max_tokens))
    }

    #[must_use]
    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            top_p: default_top_p(),
        }
    }
}

/// Response body for a legacy text completion.
#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
    pub usage: TokenUsage,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(temperature: f64, top_p: f64, max_tokens: u32) -> ChatCompletionRequest {
        ChatCompletionRequest {
            messages: vec![IncomingMessage {
                role: MessageRole::User,
                content: "hi".into(),
            }],
            model: None,
            temperature,
            max_tokens,
            top_p,
            stream: false,
            session_id: None,
        }
    }

    #[test]
    fn boundary_values_are_accepted() {
        assert!(request(0.0, 0.0, 1).validate().is_ok());
        assert!(request(2.0, 1.0, 4096).validate().is_ok());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(request(2.5, 0.9, 512).validate().is_err());
        assert!(request(-0.1, 0.9, 512).validate().is_err());
        assert!(request(0.7, 1.5, 512).validate().is_err());
        assert!(request(0.7, -0.1, 512).validate().is_err());
        assert!(request(0.7, 0.9, 0).validate().is_err());
        assert!(request(0.7, 0.9, 5000).validate().is_err());
    }

    #[test]
    fn empty_message_list_is_rejected() {
        let mut req = request(0.7, 0.9, 512);
        req.messages.clear();
        assert!(req.validate().is_err());
    }

    #[test]
    fn last_user_turn_is_found_behind_assistant_turns() {
        let mut req = request(0.7, 0.9, 512);
        req.messages = vec![
            IncomingMessage {
                role: MessageRole::User,
                content: "first".into(),
            },
            IncomingMessage {
                role: MessageRole::Assistant,
                content: "reply".into(),
            },
            IncomingMessage {
                role: MessageRole::User,
                content: "second".into(),
            },
        ];
        assert_eq!(req.last_user_content(), Some("second"));
    }
}
