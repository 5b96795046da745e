//! Chat session CRUD handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Json, response::IntoResponse};

use crate::dto::Pagination;
use crate::dto::chat::{ChatDetail, ChatSummary, CreateChatRequest, DeleteResponse, MessageBody};
use crate::error::HttpError;
use crate::state::AppState;

/// POST /v1/chats - create a new chat session.
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateChatRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let chat = state.chat_history.create_chat(req.title, req.model).await?;
    tracing::info!(chat_id = %chat.id, "chat created");
    Ok((StatusCode::CREATED, Json(ChatSummary::from(chat))))
}

/// GET /v1/chats - list chats, newest-updated first.
pub async fn list(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<ChatSummary>>, HttpError> {
    let chats = state.chat_history.get_chats(page.skip, page.limit).await?;
    Ok(Json(chats.into_iter().map(Into::into).collect()))
}

/// GET /v1/chats/{id} - a chat with its ordered messages.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ChatDetail>, HttpError> {
    let record = state
        .chat_history
        .get_chat(&id, true)
        .await?
        .ok_or_else(|| HttpError::NotFound(format!("Chat not found: {id}")))?;
    Ok(Json(record.into()))
}

/// DELETE /v1/chats/{id} - delete a chat and its messages.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, HttpError> {
    if !state.chat_history.delete_chat(&id).await? {
        return Err(HttpError::NotFound(format!("Chat not found: {id}")));
    }
    tracing::info!(chat_id = %id, "chat deleted");
    Ok(Json(DeleteResponse {
        message: format!("Chat {id} deleted"),
    }))
}

/// GET /v1/chats/{id}/messages - messages in conversation order.
pub async fn messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<MessageBody>>, HttpError> {
    // Missing chats answer 404, not an empty list.
    if state.chat_history.get_chat(&id, false).await?.is_none() {
        return Err(HttpError::NotFound(format!("Chat not found: {id}")));
    }

    let messages = state
        .chat_history
        .get_messages(&id, page.skip, page.limit)
        .await?;
    Ok(Json(messages.into_iter().map(Into::into).collect()))
}
