//! Messaging endpoint integration tests
//!
//! Covers:
//! - `POST /messages`: first message opens the conversation
//! - `GET /users/{role}/{user_id}/conversations`: summaries with unread counts
//! - `GET /conversations/{id}/messages`: oldest first
//! - `POST /conversations/{id}/read`: marks the reader's incoming messages

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{create_test_admin, create_test_student, TestApp};

#[tokio::test]
async fn test_conversation_round_trip() {
    let app = TestApp::new().await;
    let student = create_test_student(app.db(), "Naledi", "naledi@example.com").await;
    let admin = create_test_admin(app.db(), "Bursary Officer", "officer@example.com").await;

    let (status, first) = app
        .post(
            "/messages",
            json!({
                "sender_id": student.id,
                "sender_role": "student",
                "receiver_id": admin.id,
                "content": "When will results be released?"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let conversation_id = first["conversation_id"].as_i64().unwrap();
    assert_eq!(first["data"]["receiver_role"], "admin");
    assert_eq!(first["data"]["is_read"], false);

    let (_, reply) = app
        .post(
            "/messages",
            json!({
                "sender_id": admin.id,
                "sender_role": "admin",
                "receiver_id": student.id,
                "content": "By the end of the month."
            }),
        )
        .await;
    assert_eq!(reply["conversation_id"], conversation_id);

    let (status, messages) = app
        .get(&format!("/conversations/{}/messages", conversation_id))
        .await;
    assert_eq!(status, StatusCode::OK);
    let contents: Vec<&str> = messages
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["content"].as_str().unwrap())
        .collect();
    assert_eq!(
        contents,
        vec!["When will results be released?", "By the end of the month."]
    );
}

#[tokio::test]
async fn test_conversation_list_and_mark_read() {
    let app = TestApp::new().await;
    let student = create_test_student(app.db(), "Naledi", "naledi@example.com").await;
    let admin = create_test_admin(app.db(), "Bursary Officer", "officer@example.com").await;

    for content in ["Please upload your ID", "And your latest transcript"] {
        app.post(
            "/messages",
            json!({
                "sender_id": admin.id,
                "sender_role": "admin",
                "receiver_id": student.id,
                "content": content
            }),
        )
        .await;
    }

    let (status, list) = app
        .get(&format!("/users/student/{}/conversations", student.id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["counterpart_id"], admin.id);
    assert_eq!(list[0]["counterpart_name"], "Bursary Officer");
    assert_eq!(list[0]["unread_count"], 2);
    assert_eq!(list[0]["last_message"], "And your latest transcript");

    let conversation_id = list[0]["id"].as_i64().unwrap();
    let (status, body) = app
        .post(
            &format!("/conversations/{}/read", conversation_id),
            json!({ "reader_id": student.id, "reader_role": "student" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updated"], 2);

    let (_, list) = app
        .get(&format!("/users/student/{}/conversations", student.id))
        .await;
    assert_eq!(list[0]["unread_count"], 0);
}

#[tokio::test]
async fn test_send_to_unknown_receiver_is_not_found() {
    let app = TestApp::new().await;
    let student = create_test_student(app.db(), "Naledi", "naledi@example.com").await;

    let (status, _) = app
        .post(
            "/messages",
            json!({
                "sender_id": student.id,
                "sender_role": "student",
                "receiver_id": 42,
                "content": "Hello?"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_message_is_rejected() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post(
            "/messages",
            json!({ "sender_id": 1, "sender_role": "student", "receiver_id": 1, "content": "" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_role_in_path_is_bad_request() {
    let app = TestApp::new().await;
    let (status, _) = app.get("/users/sponsor/1/conversations").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_messages_of_unknown_conversation_is_not_found() {
    let app = TestApp::new().await;
    let (status, _) = app.get("/conversations/99/messages").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_sender_is_bad_request_with_json_body() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/messages",
            json!({ "sender_role": "student", "receiver_id": 1, "content": "hi" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("message").is_some());
    assert!(body["error"].as_str().unwrap().contains("sender_id"));
}

#[tokio::test]
async fn test_non_numeric_conversation_id_is_bad_request() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/conversations/latest/messages").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("message").is_some());
}
