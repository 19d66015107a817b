//! Test helpers and utilities for integration testing.
//!
//! Provides an in-memory database with migrations applied, seed helpers,
//! a notification provider that records what would have been emailed, and
//! small request helpers around `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tower::util::ServiceExt;

use bursary::endpoints::create_router;
use bursary::migrations::Migrator;
use bursary::models::role::Role;
use bursary::models::{admin, bursary as bursary_model, student};
use bursary::services::notification::{
    NotificationMessage, NotificationProvider, NotificationService, SendResult,
};
use bursary::services::{create_access_token, hash_password_with_cost, DocumentStore};
use bursary::state::AppState;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Create an in-memory SQLite database for testing
pub async fn create_test_db() -> DatabaseConnection {
    // Each in-memory connection gets its own database
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run test migrations");

    db
}

pub async fn create_test_student(db: &DatabaseConnection, name: &str, email: &str) -> student::Model {
    student::ActiveModel {
        full_name: Set(name.to_string()),
        email: Set(email.to_string()),
        hashed_password: Set(hash_password_with_cost(TEST_PASSWORD, 4).unwrap()),
        phone: Set(Some("0821234567".to_string())),
        institution: Set(Some("University of Pretoria".to_string())),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create test student")
}

pub async fn create_test_admin(db: &DatabaseConnection, name: &str, email: &str) -> admin::Model {
    admin::ActiveModel {
        full_name: Set(name.to_string()),
        email: Set(email.to_string()),
        hashed_password: Set(hash_password_with_cost(TEST_PASSWORD, 4).unwrap()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create test admin")
}

pub async fn create_test_bursary(db: &DatabaseConnection, title: &str) -> bursary_model::Model {
    bursary_model::ActiveModel {
        title: Set(title.to_string()),
        description: Set(Some("Full tuition for undergraduate study".to_string())),
        provider: Set(Some("Anglo American".to_string())),
        amount: Set(Some(75_000.0)),
        deadline: Set(None),
        created_by: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create test bursary")
}

/// Bearer token for a seeded account
pub fn token_for(id: i64, role: Role, email: &str) -> String {
    create_access_token(id, role, email).expect("Failed to create test token")
}

// ============================================================================
// Notification recording
// ============================================================================

/// Provider that forwards every message to a channel instead of sending it
pub struct RecordingProvider {
    succeed: bool,
    tx: mpsc::UnboundedSender<NotificationMessage>,
}

impl RecordingProvider {
    pub fn new(succeed: bool) -> (Self, mpsc::UnboundedReceiver<NotificationMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { succeed, tx }, rx)
    }
}

#[async_trait]
impl NotificationProvider for RecordingProvider {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, message: &NotificationMessage) -> SendResult {
        let _ = self.tx.send(message.clone());
        SendResult {
            success: self.succeed,
            error: (!self.succeed).then(|| "simulated SMTP failure".to_string()),
        }
    }
}

/// Wait for the next recorded notification
pub async fn next_notification(
    rx: &mut mpsc::UnboundedReceiver<NotificationMessage>,
) -> NotificationMessage {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for notification")
        .expect("notification channel closed")
}

/// Assert nothing further is delivered within a short window
pub async fn assert_no_notification(rx: &mut mpsc::UnboundedReceiver<NotificationMessage>) {
    let extra = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
    assert!(extra.is_err(), "unexpected extra notification: {:?}", extra);
}

// ============================================================================
// Application under test
// ============================================================================

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    pub notifications: mpsc::UnboundedReceiver<NotificationMessage>,
    pub uploads: TempDir,
}

impl TestApp {
    /// Fresh database, a recording provider that reports success and a
    /// temporary upload directory
    pub async fn new() -> Self {
        Self::with_delivery(true).await
    }

    pub async fn with_delivery(succeed: bool) -> Self {
        let db = create_test_db().await;
        let (provider, notifications) = RecordingProvider::new(succeed);
        let uploads = tempfile::tempdir().expect("Failed to create upload dir");

        let state = AppState::new(
            db,
            NotificationService::with_provider(Arc::new(provider)),
            DocumentStore::new(uploads.path()),
        );
        let router = create_router(state.clone());

        Self {
            state,
            router,
            notifications,
            uploads,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.state.db
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
        token: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        read_json(response).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        self.request(Method::POST, uri, Some(body), None).await
    }
}

/// Read a response body as JSON, or `Null` when it is empty or not JSON
pub async fn read_json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}
