//! SQLite implementation of the `ChatHistoryRepository` trait.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use chatgate_core::domain::chat::{Chat, ChatWithMessages, Message, MessageRole, NewChat, NewMessage};
use chatgate_core::ports::chat_history::{ChatHistoryError, ChatHistoryRepository};

/// SQLite implementation of the `ChatHistoryRepository` trait.
///
/// Holds a connection pool and implements all CRUD operations for chats and
/// messages.
pub struct SqliteChatHistoryRepository {
    pool: SqlitePool,
}

impl SqliteChatHistoryRepository {
    /// Create a new SQLite chat history repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_chat_row(&self, chat_id: &str) -> Result<Option<Chat>, ChatHistoryError> {
        let row = sqlx::query(
            "SELECT id, title, model, created_at, updated_at,
                    (SELECT COUNT(*) FROM messages m WHERE m.chat_id = chats.id) AS message_count
             FROM chats
             WHERE id = ?",
        )
        .bind(chat_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ChatHistoryError::Database(e.to_string()))?;

        Ok(row.map(|r| map_chat_row(&r)))
    }
}

fn map_chat_row(row: &sqlx::sqlite::SqliteRow) -> Chat {
    Chat {
        id: row.get("id"),
        title: row.get("title"),
        model: row.get("model"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        message_count: row.get("message_count"),
    }
}

fn map_message_row(row: &sqlx::sqlite::SqliteRow) -> Message {
    let role_str: String = row.get("role");
    // The CHECK constraint guarantees the role is valid; fall back to User
    // rather than failing the whole read on a corrupted row.
    let role = MessageRole::parse(&role_str).unwrap_or(MessageRole::User);
    Message {
        id: row.get("id"),
        chat_id: row.get("chat_id"),
        role,
        content: row.get("content"),
        prompt_tokens: row.get("prompt_tokens"),
        completion_tokens: row.get("completion_tokens"),
        total_tokens: row.get("total_tokens"),
        finish_reason: row.get("finish_reason"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl ChatHistoryRepository for SqliteChatHistoryRepository {
    async fn create_chat(&self, chat: NewChat) -> Result<Chat, ChatHistoryError> {
        let id = Uuid::new_v4().to_string();

        sqlx::query("INSERT INTO chats (id, title, model) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(&chat.title)
            .bind(&chat.model)
            .execute(&self.pool)
            .await
            .map_err(|e| ChatHistoryError::Database(e.to_string()))?;

        // Read the row back so the store-populated timestamps are returned.
        self.fetch_chat_row(&id)
            .await?
            .ok_or_else(|| ChatHistoryError::Database("inserted chat row missing".into()))
    }

    async fn get_chat(
        &self,
        chat_id: &str,
        include_messages: bool,
    ) -> Result<Option<ChatWithMessages>, ChatHistoryError> {
        let Some(chat) = self.fetch_chat_row(chat_id).await? else {
            return Ok(None);
        };

        let messages = if include_messages {
            sqlx::query(
                "SELECT id, chat_id, role, content, prompt_tokens, completion_tokens,
                        total_tokens, finish_reason, created_at
                 FROM messages
                 WHERE chat_id = ?
                 ORDER BY created_at ASC, id ASC",
            )
            .bind(chat_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ChatHistoryError::Database(e.to_string()))?
            .iter()
            .map(map_message_row)
            .collect()
        } else {
            Vec::new()
        };

        Ok(Some(ChatWithMessages { chat, messages }))
    }

    async fn get_chats(&self, skip: i64, limit: i64) -> Result<Vec<Chat>, ChatHistoryError> {
        let rows = sqlx::query(
            "SELECT id, title, model, created_at, updated_at,
                    (SELECT COUNT(*) FROM messages m WHERE m.chat_id = chats.id) AS message_count
             FROM chats
             ORDER BY updated_at DESC, created_at DESC
             LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ChatHistoryError::Database(e.to_string()))?;

        Ok(rows.iter().map(map_chat_row).collect())
    }

    async fn delete_chat(&self, chat_id: &str) -> Result<bool, ChatHistoryError> {
        let result = sqlx::query("DELETE FROM chats WHERE id = ?")
            .bind(chat_id)
            .execute(&self.pool)
            .await
            .map_err(|e| ChatHistoryError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_message(&self, msg: NewMessage) -> Result<Message, ChatHistoryError> {
        let result = sqlx::query(
            "INSERT INTO messages
                (chat_id, role, content, prompt_tokens, completion_tokens, total_tokens, finish_reason)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&msg.chat_id)
        .bind(msg.role.as_str())
        .bind(&msg.content)
        .bind(msg.prompt_tokens)
        .bind(msg.completion_tokens)
        .bind(msg.total_tokens)
        .bind(&msg.finish_reason)
        .execute(&self.pool)
        .await
        .map_err(|e| ChatHistoryError::Database(e.to_string()))?;

        let message_id = result.last_insert_rowid();

        // Appending a message counts as activity on the chat.
        sqlx::query("UPDATE chats SET updated_at = datetime('now') WHERE id = ?")
            .bind(&msg.chat_id)
            .execute(&self.pool)
            .await
            .map_err(|e| ChatHistoryError::Database(e.to_string()))?;

        let row = sqlx::query(
            "SELECT id, chat_id, role, content, prompt_tokens, completion_tokens,
                    total_tokens, finish_reason, created_at
             FROM messages
             WHERE id = ?",
        )
        .bind(message_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ChatHistoryError::Database(e.to_string()))?;

        Ok(map_message_row(&row))
    }

    async fn get_messages(
        &self,
        chat_id: &str,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Message>, ChatHistoryError> {
        let rows = sqlx::query(
            "SELECT id, chat_id, role, content, prompt_tokens, completion_tokens,
                    total_tokens, finish_reason, created_at
             FROM messages
             WHERE chat_id = ?
             ORDER BY created_at ASC, id ASC
             LIMIT ? OFFSET ?",
        )
        .bind(chat_id)
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ChatHistoryError::Database(e.to_string()))?;

        Ok(rows.iter().map(map_message_row).collect())
    }
}
