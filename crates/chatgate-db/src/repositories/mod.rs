//! SQLite implementations of the chatgate persistence ports.

mod sqlite_chat_history;
mod sqlite_llm_config;

pub use sqlite_chat_history::SqliteChatHistoryRepository;
pub use sqlite_llm_config::SqliteLlmConfigRepository;
