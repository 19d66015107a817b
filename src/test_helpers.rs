//! Test helpers and utilities for unit tests.
//!
//! Integration tests under `tests/` carry their own copy in
//! `tests/common/mod.rs`, since `#[cfg(test)]` items are not visible there.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use tokio::sync::mpsc;

use crate::migrations::Migrator;
use crate::models::{admin, bursary, student};
use crate::services::notification::{NotificationMessage, NotificationProvider, SendResult};
use crate::services::security::hash_password_with_cost;

/// Password every seeded account is created with
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Create an in-memory SQLite database with all migrations applied
pub async fn create_test_db() -> DatabaseConnection {
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
        phone: Set(None),
        institution: Set(Some("University of Cape Town".to_string())),
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

pub async fn create_test_bursary(db: &DatabaseConnection, title: &str) -> bursary::Model {
    bursary::ActiveModel {
        title: Set(title.to_string()),
        description: Set(Some("Covers tuition and books".to_string())),
        provider: Set(Some("Sasol".to_string())),
        amount: Set(Some(50_000.0)),
        deadline: Set(None),
        created_by: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create test bursary")
}

/// Notification provider that forwards every message to a channel
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
        if self.succeed {
            SendResult {
                success: true,
                error: None,
            }
        } else {
            SendResult {
                success: false,
                error: Some("simulated SMTP failure".to_string()),
            }
        }
    }
}
