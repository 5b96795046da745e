//! SQLite repository implementations for chatgate.
//!
//! Implements the persistence ports from `chatgate-core` over a pooled
//! `sqlx` SQLite connection.

pub mod repositories;
pub mod setup;

pub use repositories::{SqliteChatHistoryRepository, SqliteLlmConfigRepository};
pub use setup::setup_database;

#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
