//! Integration tests for the chat session routes.

mod common;

use axum::http::StatusCode;
use tower::ServiceExt;

use common::{body_json, delete, get, post_json, test_app};

#[tokio::test]
async fn created_chat_starts_with_zero_messages() {
    let app = test_app().await;

    let response = app
        .oneshot(post_json(
            "/v1/chats",
            serde_json::json!({"title": "first chat"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["title"], "first chat");
    assert_eq!(body["message_count"], 0);
    assert!(!body["id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn chats_are_listed_after_creation() {
    let app = test_app().await;

    for title in ["one", "two"] {
        let response = app
            .clone()
            .oneshot(post_json("/v1/chats", serde_json::json!({"title": title})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.oneshot(get("/v1/chats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn missing_chat_answers_404() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(get("/v1/chats/no-such-id"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(get("/v1/chats/no-such-id/messages"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(delete("/v1/chats/no-such-id")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleted_chat_is_gone() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(post_json("/v1/chats", serde_json::json!({})))
        .await
        .unwrap();
    let chat_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(delete(&format!("/v1/chats/{chat_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get(&format!("/v1/chats/{chat_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn completion_with_session_is_readable_from_the_chat() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(post_json("/v1/chats", serde_json::json!({})))
        .await
        .unwrap();
    let chat_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(post_json(
            "/v1/chat/completions",
            serde_json::json!({
                "messages": [{"role": "user", "content": "hello there"}],
                "session_id": chat_id,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get(&format!("/v1/chats/{chat_id}/messages")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let messages = body_json(response).await;
    let messages = messages.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "hello there");
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["content"], "stubbed reply");
    assert_eq!(messages[1]["total_tokens"], 15);

    // The chat detail reflects the appended messages too.
    let response = app
        .oneshot(get(&format!("/v1/chats/{chat_id}")))
        .await
        .unwrap();
    let detail = body_json(response).await;
    assert_eq!(detail["message_count"], 2);
    assert_eq!(detail["messages"].as_array().unwrap().len(), 2);
}
