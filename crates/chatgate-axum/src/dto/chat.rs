//! Chat session DTOs.

use serde::{Deserialize, Serialize};

use chatgate_core::domain::chat::{Chat, ChatWithMessages, Message, MessageRole};

/// Request body for creating a new chat.
#[derive(Debug, Default, Deserialize)]
pub struct CreateChatRequest {
    pub title: Option<String>,
    pub model: Option<String>,
}

/// A chat without its message bodies.
#[derive(Debug, Serialize)]
pub struct ChatSummary {
    pub id: String,
    pub title: Option<String>,
    pub model: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub message_count: i64,
}

impl From<Chat> for ChatSummary {
    fn from(chat: Chat) -> Self {
        Self {
            id: chat.id,
            title: chat.title,
            model: chat.model,
            created_at: chat.created_at,
            updated_at: chat.updated_at,
            message_count: chat.message_count,
        }
    }
}

/// A chat together with its ordered messages.
#[derive(Debug, Serialize)]
pub struct ChatDetail {
    #[serde(flatten)]
    pub chat: ChatSummary,
    pub messages: Vec<MessageBody>,
}

impl From<ChatWithMessages> for ChatDetail {
    fn from(record: ChatWithMessages) -> Self {
        Self {
            chat: record.chat.into(),
            messages: record.messages.into_iter().map(Into::into).collect(),
        }
    }
}

/// A single persisted message.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub id: i64,
    pub role: MessageRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    pub created_at: String,
}

impl From<Message> for MessageBody {
    fn from(msg: Message) -> Self {
        Self {
            id: msg.id,
            role: msg.role,
            content: msg.content,
            prompt_tokens: msg.prompt_tokens,
            completion_tokens: msg.completion_tokens,
            total_tokens: msg.total_tokens,
            finish_reason: msg.finish_reason,
            created_at: msg.created_at,
        }
    }
}

/// Confirmation body for deletions.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}
