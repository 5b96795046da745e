//! HTTP request handlers, grouped by API surface.

pub mod chats;
pub mod completions;
pub mod llm_configs;
pub mod system;
