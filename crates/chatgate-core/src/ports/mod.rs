//! Port definitions implemented by adapter crates.

pub mod chat_history;
pub mod inference;
pub mod llm_config;

pub use chat_history::{ChatHistoryError, ChatHistoryRepository};
pub use inference::{FragmentStream, InferenceClient, InferenceError};
pub use llm_config::{LlmConfigError, LlmConfigRepository};
