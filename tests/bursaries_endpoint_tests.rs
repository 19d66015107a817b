//! Bursary endpoint integration tests
//!
//! Covers:
//! - `GET /bursaries`, `GET /bursaries/{id}`: public
//! - `POST`, `PUT`, `DELETE`: admin Bearer token required

use axum::http::{Method, StatusCode};
use serde_json::json;

mod common;
use common::{create_test_admin, create_test_bursary, create_test_student, token_for, TestApp};

use bursary::models::role::Role;

async fn admin_token(app: &TestApp) -> (i64, String) {
    let admin = create_test_admin(app.db(), "Officer", "officer@example.com").await;
    (admin.id, token_for(admin.id, Role::Admin, &admin.email))
}

#[tokio::test]
async fn test_list_and_get_are_public() {
    let app = TestApp::new().await;
    let created = create_test_bursary(app.db(), "Engineering Bursary").await;
    create_test_bursary(app.db(), "Nursing Bursary").await;

    let (status, list) = app.get("/bursaries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 2);

    let (status, one) = app.get(&format!("/bursaries/{}", created.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["title"], "Engineering Bursary");
}

#[tokio::test]
async fn test_search_filters_by_title() {
    let app = TestApp::new().await;
    create_test_bursary(app.db(), "Engineering Bursary").await;
    create_test_bursary(app.db(), "Nursing Bursary").await;

    let (_, list) = app.get("/bursaries?search=Nursing").await;

    let titles: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Nursing Bursary"]);
}

#[tokio::test]
async fn test_get_unknown_bursary_is_not_found() {
    let app = TestApp::new().await;
    let (status, _) = app.get("/bursaries/31337").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_can_create_update_and_delete() {
    let app = TestApp::new().await;
    let (admin_id, token) = admin_token(&app).await;

    let (status, created) = app
        .request(
            Method::POST,
            "/bursaries",
            Some(json!({
                "title": "Actuarial Science Bursary",
                "provider": "Old Mutual",
                "amount": 120000.0,
                "deadline": "2026-11-30"
            })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["created_by"], admin_id);
    assert_eq!(created["deadline"], "2026-11-30");
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = app
        .request(
            Method::PUT,
            &format!("/bursaries/{}", id),
            Some(json!({ "amount": 150000.0 })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["amount"], 150000.0);
    assert_eq!(updated["title"], "Actuarial Science Bursary");

    let (status, _) = app
        .request(Method::DELETE, &format!("/bursaries/{}", id), None, Some(&token))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&format!("/bursaries/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_writes_require_admin() {
    let app = TestApp::new().await;
    let student = create_test_student(app.db(), "Thabo", "thabo@example.com").await;
    let student_token = token_for(student.id, Role::Student, &student.email);
    let body = json!({ "title": "Sneaky Bursary" });

    let (anonymous, _) = app
        .request(Method::POST, "/bursaries", Some(body.clone()), None)
        .await;
    let (as_student, _) = app
        .request(Method::POST, "/bursaries", Some(body), Some(&student_token))
        .await;

    assert_eq!(anonymous, StatusCode::UNAUTHORIZED);
    assert_eq!(as_student, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_validates_title_and_amount() {
    let app = TestApp::new().await;
    let (_, token) = admin_token(&app).await;

    let (status, body) = app
        .request(
            Method::POST,
            "/bursaries",
            Some(json!({ "title": "", "amount": -5.0 })),
            Some(&token),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let detail = body["error"].as_str().unwrap();
    assert!(detail.contains("title"));
    assert!(detail.contains("amount"));
}

#[tokio::test]
async fn test_delete_unknown_bursary_is_not_found() {
    let app = TestApp::new().await;
    let (_, token) = admin_token(&app).await;

    let (status, _) = app
        .request(Method::DELETE, "/bursaries/999", None, Some(&token))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
