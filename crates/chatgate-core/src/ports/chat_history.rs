//! Chat history repository port definition.
//!
//! This port defines the interface for persisting and retrieving chats and
//! their messages. Implementations handle the actual storage mechanism.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::chat::{Chat, ChatWithMessages, Message, NewChat, NewMessage};

/// Errors that can occur in chat history operations.
#[derive(Debug, Error)]
pub enum ChatHistoryError {
    #[error("Chat not found: {0}")]
    ChatNotFound(String),

    #[error("Invalid message role: {0}")]
    InvalidRole(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Port for chat history persistence operations.
///
/// Lookup operations signal a missing row through `Option`/`bool`, never
/// through an error. Storage failures (including foreign-key violations on
/// `add_message`) surface as [`ChatHistoryError::Database`] unmodified; the
/// repository does not retry.
#[async_trait]
pub trait ChatHistoryRepository: Send + Sync {
    /// Create a new chat with a freshly generated identifier and return the
    /// persisted row.
    async fn create_chat(&self, chat: NewChat) -> Result<Chat, ChatHistoryError>;

    /// Get a chat by id. When `include_messages` is set, the ordered message
    /// collection is loaded alongside the chat.
    async fn get_chat(
        &self,
        chat_id: &str,
        include_messages: bool,
    ) -> Result<Option<ChatWithMessages>, ChatHistoryError>;

    /// List chats ordered by most recently updated, with pagination.
    async fn get_chats(&self, skip: i64, limit: i64) -> Result<Vec<Chat>, ChatHistoryError>;

    /// Delete a chat and all its messages. Returns whether a row was
    /// actually deleted.
    async fn delete_chat(&self, chat_id: &str) -> Result<bool, ChatHistoryError>;

    /// Append a message and bump the owning chat's update timestamp.
    ///
    /// Chat existence is enforced by the foreign key only; callers wanting a
    /// friendly not-found must pre-validate with [`Self::get_chat`].
    async fn add_message(&self, msg: NewMessage) -> Result<Message, ChatHistoryError>;

    /// Get messages for a chat in creation order (ascending), with
    /// pagination.
    async fn get_messages(
        &self,
        chat_id: &str,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Message>, ChatHistoryError>;
}
