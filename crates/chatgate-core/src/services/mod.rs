//! Core services - thin orchestrators over the ports.

pub mod chat_history;

pub use chat_history::ChatHistoryService;
