//! Core domain types, port definitions, and services for chatgate.
//!
//! This crate is infrastructure-free: no database driver, no HTTP client,
//! no web framework. Adapters implement the ports defined here.

pub mod domain;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    Chat, ChatWithMessages, CompletionOutcome, GenerationParams, LlmConfig, Message, MessageRole,
    NewChat, NewLlmConfig, NewMessage, PromptMessage, TokenUsage,
};
pub use ports::{
    ChatHistoryError, ChatHistoryRepository, FragmentStream, InferenceClient, InferenceError,
    LlmConfigError, LlmConfigRepository,
};
pub use services::ChatHistoryService;
pub use settings::{Settings, SettingsError};
