//! Application endpoint integration tests
//!
//! Covers:
//! - `POST /applications`: submit (201, 400, 404, 409)
//! - `POST /applications/withdraw`: withdraw (200, 400, 404)
//! - `GET /admin/applications`: every application with its history
//! - `GET /student/{id}/applications`: a student's applications

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{
    assert_no_notification, create_test_bursary, create_test_student, next_notification, TestApp,
};

#[tokio::test]
async fn test_submit_application_returns_created() {
    let mut app = TestApp::new().await;
    let student = create_test_student(app.db(), "Naledi", "naledi@example.com").await;
    let bursary = create_test_bursary(app.db(), "Engineering Bursary").await;

    let (status, body) = app
        .post(
            "/applications",
            json!({ "student_id": student.id, "bursary_id": bursary.id }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["current_status"], "Submitted");
    assert_eq!(body["notification"], "queued");
    assert!(body["application_id"].as_i64().unwrap() > 0);

    let mail = next_notification(&mut app.notifications).await;
    assert_eq!(mail.recipient, "naledi@example.com");
}

#[tokio::test]
async fn test_submit_missing_fields_is_bad_request() {
    let mut app = TestApp::new().await;

    let (status, body) = app.post("/applications", json!({ "student_id": 1 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("bursary_id"));
    assert!(body.get("message").is_some());
    assert_no_notification(&mut app.notifications).await;
}

#[tokio::test]
async fn test_submit_malformed_body_is_bad_request() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post("/applications", json!({ "student_id": "one", "bursary_id": 2 }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_unknown_bursary_is_not_found() {
    let app = TestApp::new().await;
    let student = create_test_student(app.db(), "Naledi", "naledi@example.com").await;

    let (status, body) = app
        .post(
            "/applications",
            json!({ "student_id": student.id, "bursary_id": 999 }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Bursary not found");
}

#[tokio::test]
async fn test_duplicate_submit_is_conflict() {
    let app = TestApp::new().await;
    let student = create_test_student(app.db(), "Naledi", "naledi@example.com").await;
    let bursary = create_test_bursary(app.db(), "Engineering Bursary").await;
    let body = json!({ "student_id": student.id, "bursary_id": bursary.id });

    let (first, _) = app.post("/applications", body.clone()).await;
    let (second, response) = app.post("/applications", body).await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    assert_eq!(response["error"], "You have already applied for this bursary");
}

#[tokio::test]
async fn test_withdraw_then_history_is_gone() {
    let mut app = TestApp::new().await;
    let student = create_test_student(app.db(), "Thabo", "thabo@example.com").await;
    let bursary = create_test_bursary(app.db(), "Law Bursary").await;
    let pair = json!({ "student_id": student.id, "bursary_id": bursary.id });

    let (_, submitted) = app.post("/applications", pair.clone()).await;
    let app_id = submitted["application_id"].as_i64().unwrap();
    next_notification(&mut app.notifications).await;

    let (status, body) = app.post("/applications/withdraw", pair).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["application_id"], app_id);
    assert_eq!(body["notification"], "queued");

    let mail = next_notification(&mut app.notifications).await;
    assert_eq!(mail.subject, "Bursary Application Withdrawn");

    let (status, _) = app.get(&format!("/status/{}", app_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_withdraw_without_application_is_not_found() {
    let app = TestApp::new().await;
    let student = create_test_student(app.db(), "Thabo", "thabo@example.com").await;
    let bursary = create_test_bursary(app.db(), "Law Bursary").await;

    let (status, _) = app
        .post(
            "/applications/withdraw",
            json!({ "student_id": student.id, "bursary_id": bursary.id }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_withdraw_missing_fields_is_bad_request() {
    let app = TestApp::new().await;

    let (status, _) = app.post("/applications/withdraw", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_applications_include_student_and_history() {
    let app = TestApp::new().await;
    let student = create_test_student(app.db(), "Lerato Dlamini", "lerato@example.com").await;
    let bursary = create_test_bursary(app.db(), "Medicine Bursary").await;
    app.post(
        "/applications",
        json!({ "student_id": student.id, "bursary_id": bursary.id }),
    )
    .await;

    let (status, body) = app.get("/admin/applications").await;

    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["student_name"], "Lerato Dlamini");
    assert_eq!(list[0]["student_email"], "lerato@example.com");
    assert_eq!(list[0]["bursary_title"], "Medicine Bursary");
    assert_eq!(list[0]["current_status"], "Submitted");
    assert_eq!(list[0]["status_history"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_student_applications_only_lists_their_own() {
    let app = TestApp::new().await;
    let mine = create_test_student(app.db(), "Ayanda", "ayanda@example.com").await;
    let other = create_test_student(app.db(), "Bongani", "bongani@example.com").await;
    let bursary = create_test_bursary(app.db(), "Science Bursary").await;

    for student_id in [mine.id, other.id] {
        app.post(
            "/applications",
            json!({ "student_id": student_id, "bursary_id": bursary.id }),
        )
        .await;
    }

    let (status, body) = app.get(&format!("/student/{}/applications", mine.id)).await;

    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["student_id"], mine.id);
    assert_eq!(list[0]["bursary_title"], "Science Bursary");
    assert_eq!(list[0]["bursary_provider"], "Anglo American");
}
