//! Chat history service - thin orchestrator for chat operations.
//!
//! Delegates all persistence to the `ChatHistoryRepository` port. Business
//! logic that does not belong in the repository layer lives here.

use std::sync::Arc;

use crate::domain::chat::{Chat, ChatWithMessages, Message, NewChat, NewMessage};
use crate::ports::chat_history::{ChatHistoryError, ChatHistoryRepository};

/// Service for managing chat history.
#[derive(Clone)]
pub struct ChatHistoryService {
    repo: Arc<dyn ChatHistoryRepository>,
}

impl ChatHistoryService {
    /// Create a new chat history service.
    pub fn new(repo: Arc<dyn ChatHistoryRepository>) -> Self {
        Self { repo }
    }

    /// Create a new chat.
    pub async fn create_chat(
        &self,
        title: Option<String>,
        model: Option<String>,
    ) -> Result<Chat, ChatHistoryError> {
        self.repo.create_chat(NewChat { title, model }).await
    }

    /// Get a chat by id, optionally with its messages.
    pub async fn get_chat(
        &self,
        chat_id: &str,
        include_messages: bool,
    ) -> Result<Option<ChatWithMessages>, ChatHistoryError> {
        self.repo.get_chat(chat_id, include_messages).await
    }

    /// List chats ordered by most recently updated.
    pub async fn get_chats(&self, skip: i64, limit: i64) -> Result<Vec<Chat>, ChatHistoryError> {
        self.repo.get_chats(skip, limit).await
    }

    /// Delete a chat and all its messages. Returns whether it existed.
    pub async fn delete_chat(&self, chat_id: &str) -> Result<bool, ChatHistoryError> {
        self.repo.delete_chat(chat_id).await
    }

    /// Append a message to a chat.
    pub async fn add_message(&self, msg: NewMessage) -> Result<Message, ChatHistoryError> {
        self.repo.add_message(msg).await
    }

    /// Get messages for a chat in conversation order.
    pub async fn get_messages(
        &self,
        chat_id: &str,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Message>, ChatHistoryError> {
        self.repo.get_messages(chat_id, skip, limit).await
    }
}
