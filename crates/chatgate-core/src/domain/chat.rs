//! Chat domain types.
//!
//! A chat is a named, ordered sequence of messages. Chat identifiers are
//! opaque strings generated at creation time and never reused.

use serde::{Deserialize, Serialize};

/// A chat session.
///
/// `message_count` is always populated by the repository, even when the
/// message bodies themselves are not loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub title: Option<String>,
    pub model: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub message_count: i64,
}

/// A message within a chat.
///
/// Messages are immutable once created. Token-usage fields are present only
/// on assistant messages produced by a real completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub chat_id: String,
    pub role: MessageRole,
    pub content: String,
    pub prompt_tokens: Option<i64>,
    pub completion_tokens: Option<i64>,
    pub total_tokens: Option<i64>,
    pub finish_reason: Option<String>,
    pub created_at: String,
}

/// The role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    /// Parse a role from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "system" => Some(Self::System),
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            _ => None,
        }
    }

    /// Convert role to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A chat together with its ordered messages.
///
/// `messages` is empty when the caller did not ask for them to be loaded.
#[derive(Debug, Clone, Serialize)]
pub struct ChatWithMessages {
    pub chat: Chat,
    pub messages: Vec<Message>,
}

/// Data for creating a new chat.
#[derive(Debug, Clone, Default)]
pub struct NewChat {
    pub title: Option<String>,
    pub model: Option<String>,
}

/// Data for appending a message to a chat.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub chat_id: String,
    pub role: MessageRole,
    pub content: String,
    pub prompt_tokens: Option<i64>,
    pub completion_tokens: Option<i64>,
    pub total_tokens: Option<i64>,
    pub finish_reason: Option<String>,
}

impl NewMessage {
    /// A message with no usage metadata (user or system turns).
    #[must_use]
    pub fn plain(chat_id: impl Into<String>, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            role,
            content: content.into(),
            prompt_tokens: None,
            completion_tokens: None,
            total_tokens: None,
            finish_reason: None,
        }
    }
}
