//! Domain types, independent of any infrastructure concerns.

pub mod chat;
pub mod inference;
pub mod llm_config;

pub use chat::{Chat, ChatWithMessages, Message, MessageRole, NewChat, NewMessage};
pub use inference::{CompletionOutcome, GenerationParams, PromptMessage, TokenUsage};
pub use llm_config::{LlmConfig, NewLlmConfig};
