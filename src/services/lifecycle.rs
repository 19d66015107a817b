//! Application lifecycle management
//!
//! Every change to an application's status goes through here. The history in
//! `status_updates` is append-only, and `applications.current_status` always
//! mirrors its newest row: both are written in the same transaction, so a
//! reader sees either the old pair or the new pair, never a mix.
//!
//! Notifications are sent after commit on a detached task. A failed or
//! skipped notification never affects the outcome of the write.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr, TransactionTrait,
};

use crate::db::DbConn;
use crate::error::{AppError, Result};
use crate::models::application::INITIAL_STATUS;
use crate::models::prelude::*;
use crate::models::role::Role;
use crate::models::{application, bursary, document, status_update, student};
use crate::schemas::{AdminApplicationView, StudentApplicationView};
use crate::services::notification::{
    ApplicationEvent, ApplicationNotification, NotificationOutcome, NotificationService,
};

const SUBMISSION_REMARKS: &str = "Application submitted by student";
const SUBMISSION_ACTION: &str = "Initial Submission";
pub const DEFAULT_ACTION_TYPE: &str = "Status Update";

/// A status change requested by a student or admin
#[derive(Debug, Clone)]
pub struct NewTransition {
    pub application_id: i64,
    pub status: String,
    pub updated_by: i64,
    pub updated_by_role: Role,
    pub remarks: Option<String>,
    pub is_visible_to_student: bool,
    pub action_type: String,
    pub attachment_url: Option<String>,
}

impl NewTransition {
    /// A visible transition with the default action type
    pub fn new(application_id: i64, status: &str, updated_by: i64, updated_by_role: Role) -> Self {
        Self {
            application_id,
            status: status.to_string(),
            updated_by,
            updated_by_role,
            remarks: None,
            is_visible_to_student: true,
            action_type: DEFAULT_ACTION_TYPE.to_string(),
            attachment_url: None,
        }
    }

    pub fn with_remarks(mut self, remarks: &str) -> Self {
        self.remarks = Some(remarks.to_string());
        self
    }

    pub fn hidden_from_student(mut self) -> Self {
        self.is_visible_to_student = false;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub application: application::Model,
    pub initial_update: status_update::Model,
    pub notification: NotificationOutcome,
}

#[derive(Debug, Clone)]
pub struct Withdrawal {
    pub application_id: i64,
    /// Public paths of document files whose rows were deleted
    pub removed_files: Vec<String>,
    pub notification: NotificationOutcome,
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub application: application::Model,
    pub update: status_update::Model,
    pub notification: NotificationOutcome,
}

/// Owns the application/status-history invariant and triggers notifications
#[derive(Clone)]
pub struct ApplicationLifecycle {
    db: DbConn,
    notifier: NotificationService,
}

impl ApplicationLifecycle {
    pub fn new(db: DbConn, notifier: NotificationService) -> Self {
        Self { db, notifier }
    }

    /// Create an application and its initial "Submitted" history entry
    pub async fn submit(&self, student_id: i64, bursary_id: i64) -> Result<Submission> {
        let txn = self.db.begin().await?;

        let student = Student::find_by_id(student_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;
        let bursary = Bursary::find_by_id(bursary_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Bursary not found".to_string()))?;

        let existing = Application::find()
            .filter(application::Column::StudentId.eq(student_id))
            .filter(application::Column::BursaryId.eq(bursary_id))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(duplicate_application());
        }

        let now = Utc::now();
        let created = insert_application(&txn, student_id, bursary_id, now).await?;

        let initial_update = status_update::ActiveModel {
            application_id: Set(created.id),
            status: Set(INITIAL_STATUS.to_string()),
            updated_by: Set(student_id),
            updated_by_role: Set(Role::Student.as_str().to_string()),
            remarks: Set(Some(SUBMISSION_REMARKS.to_string())),
            is_visible_to_student: Set(true),
            action_type: Set(SUBMISSION_ACTION.to_string()),
            attachment_url: Set(None),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        tracing::info!(
            "Application {} submitted by student {} for bursary {}",
            created.id,
            student_id,
            bursary_id
        );

        let notification = self.notify(Some(notification_for(
            &student,
            &bursary,
            ApplicationEvent::Submitted,
        )));

        Ok(Submission {
            application: created,
            initial_update,
            notification,
        })
    }

    /// Delete a student's application for a bursary along with its history
    /// and documents
    pub async fn withdraw(&self, student_id: i64, bursary_id: i64) -> Result<Withdrawal> {
        let txn = self.db.begin().await?;

        let app = Application::find()
            .filter(application::Column::StudentId.eq(student_id))
            .filter(application::Column::BursaryId.eq(bursary_id))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("No application found for this student and bursary".to_string())
            })?;

        // Captured before the delete so the confirmation can still be sent
        let context = load_context(&txn, app.student_id, app.bursary_id, ApplicationEvent::Withdrawn)
            .await?;

        let removed_files: Vec<String> = Document::find()
            .filter(document::Column::ApplicationId.eq(app.id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|d| d.file_path)
            .collect();

        Document::delete_many()
            .filter(document::Column::ApplicationId.eq(app.id))
            .exec(&txn)
            .await?;
        StatusUpdate::delete_many()
            .filter(status_update::Column::ApplicationId.eq(app.id))
            .exec(&txn)
            .await?;
        Application::delete_by_id(app.id).exec(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            "Application {} withdrawn by student {} (bursary {})",
            app.id,
            student_id,
            bursary_id
        );

        let notification = self.notify(context);

        Ok(Withdrawal {
            application_id: app.id,
            removed_files,
            notification,
        })
    }

    /// Append a status change and bring `current_status` in line with it
    pub async fn record_transition(&self, transition: NewTransition) -> Result<Transition> {
        let status = transition.status.trim().to_string();
        if status.is_empty() {
            return Err(AppError::Validation("status must not be empty".to_string()));
        }
        let action_type = match transition.action_type.trim() {
            "" => DEFAULT_ACTION_TYPE.to_string(),
            other => other.to_string(),
        };

        let txn = self.db.begin().await?;

        // Updating the summary first takes the row lock, which serialises
        // concurrent transitions on the same application
        let updated = Application::update_many()
            .col_expr(application::Column::CurrentStatus, Expr::value(status.clone()))
            .filter(application::Column::Id.eq(transition.application_id))
            .exec(&txn)
            .await?;
        if updated.rows_affected == 0 {
            return Err(AppError::NotFound("Application not found".to_string()));
        }

        let latest = StatusUpdate::find()
            .filter(status_update::Column::ApplicationId.eq(transition.application_id))
            .order_by_desc(status_update::Column::UpdatedAt)
            .order_by_desc(status_update::Column::Id)
            .one(&txn)
            .await?;

        // Never let a new entry sort before the previous one
        let now = Utc::now();
        let updated_at = latest.map_or(now, |l| now.max(l.updated_at));

        let update = status_update::ActiveModel {
            application_id: Set(transition.application_id),
            status: Set(status.clone()),
            updated_by: Set(transition.updated_by),
            updated_by_role: Set(transition.updated_by_role.as_str().to_string()),
            remarks: Set(transition.remarks.clone()),
            is_visible_to_student: Set(transition.is_visible_to_student),
            action_type: Set(action_type),
            attachment_url: Set(transition.attachment_url.clone()),
            updated_at: Set(updated_at),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let app = Application::find_by_id(transition.application_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

        txn.commit().await?;

        tracing::info!(
            "Application {} moved to '{}' by {} {}",
            app.id,
            status,
            transition.updated_by_role,
            transition.updated_by
        );

        let event = ApplicationEvent::StatusChanged {
            status,
            remarks: transition.remarks,
        };
        let context = match load_context(&self.db, app.student_id, app.bursary_id, event).await {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(
                    "Could not load notification context for application {}: {}",
                    app.id,
                    e
                );
                None
            }
        };
        let notification = self.notify(context);

        Ok(Transition {
            application: app,
            update,
            notification,
        })
    }

    /// Full ordered history of an application, oldest first
    pub async fn history(
        &self,
        application_id: i64,
        visible_only: bool,
    ) -> Result<Vec<status_update::Model>> {
        Application::find_by_id(application_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

        let mut query =
            StatusUpdate::find().filter(status_update::Column::ApplicationId.eq(application_id));
        if visible_only {
            query = query.filter(status_update::Column::IsVisibleToStudent.eq(true));
        }

        Ok(query
            .order_by_asc(status_update::Column::UpdatedAt)
            .order_by_asc(status_update::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Every application with student, bursary and full history attached
    pub async fn admin_view(&self) -> Result<Vec<AdminApplicationView>> {
        let apps = Application::find()
            .order_by_desc(application::Column::ApplicationDate)
            .order_by_desc(application::Column::Id)
            .all(&self.db)
            .await?;
        if apps.is_empty() {
            return Ok(vec![]);
        }

        let students: HashMap<i64, student::Model> = Student::find()
            .filter(student::Column::Id.is_in(unique_ids(apps.iter().map(|a| a.student_id))))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();
        let bursaries = self
            .bursaries_by_id(apps.iter().map(|a| a.bursary_id))
            .await?;
        let mut histories = self
            .histories_for(apps.iter().map(|a| a.id), false)
            .await?;

        Ok(apps
            .into_iter()
            .map(|app| {
                let student = students.get(&app.student_id);
                AdminApplicationView {
                    student_name: student.map(|s| s.full_name.clone()),
                    student_email: student.map(|s| s.email.clone()),
                    bursary_title: bursaries.get(&app.bursary_id).map(|b| b.title.clone()),
                    status_history: histories.remove(&app.id).unwrap_or_default(),
                    application: app,
                }
            })
            .collect())
    }

    /// A student's applications with bursary details and visible history
    pub async fn student_view(&self, student_id: i64) -> Result<Vec<StudentApplicationView>> {
        let apps = Application::find()
            .filter(application::Column::StudentId.eq(student_id))
            .order_by_desc(application::Column::ApplicationDate)
            .order_by_desc(application::Column::Id)
            .all(&self.db)
            .await?;
        if apps.is_empty() {
            return Ok(vec![]);
        }

        let bursaries = self
            .bursaries_by_id(apps.iter().map(|a| a.bursary_id))
            .await?;
        let mut histories = self.histories_for(apps.iter().map(|a| a.id), true).await?;

        Ok(apps
            .into_iter()
            .map(|app| {
                let bursary = bursaries.get(&app.bursary_id);
                StudentApplicationView {
                    bursary_title: bursary.map(|b| b.title.clone()),
                    bursary_provider: bursary.and_then(|b| b.provider.clone()),
                    status_history: histories.remove(&app.id).unwrap_or_default(),
                    application: app,
                }
            })
            .collect())
    }

    async fn bursaries_by_id(
        &self,
        ids: impl Iterator<Item = i64>,
    ) -> Result<HashMap<i64, bursary::Model>> {
        Ok(Bursary::find()
            .filter(bursary::Column::Id.is_in(unique_ids(ids)))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect())
    }

    /// History rows for a set of applications in one query, grouped by
    /// application and kept in chronological order
    async fn histories_for(
        &self,
        application_ids: impl Iterator<Item = i64>,
        visible_only: bool,
    ) -> Result<HashMap<i64, Vec<status_update::Model>>> {
        let mut query = StatusUpdate::find()
            .filter(status_update::Column::ApplicationId.is_in(unique_ids(application_ids)));
        if visible_only {
            query = query.filter(status_update::Column::IsVisibleToStudent.eq(true));
        }

        let rows = query
            .order_by_asc(status_update::Column::UpdatedAt)
            .order_by_asc(status_update::Column::Id)
            .all(&self.db)
            .await?;

        let mut grouped: HashMap<i64, Vec<status_update::Model>> = HashMap::new();
        for row in rows {
            grouped.entry(row.application_id).or_default().push(row);
        }
        Ok(grouped)
    }

    fn notify(&self, notification: Option<ApplicationNotification>) -> NotificationOutcome {
        match notification {
            Some(n) => {
                self.notifier.dispatch(n);
                NotificationOutcome::Queued
            }
            None => NotificationOutcome::Skipped,
        }
    }
}

/// Insert the application row. A unique violation means a concurrent submit
/// for the same pair won after our duplicate check.
async fn insert_application<C: ConnectionTrait>(
    db: &C,
    student_id: i64,
    bursary_id: i64,
    submitted_at: DateTime<Utc>,
) -> Result<application::Model> {
    application::ActiveModel {
        student_id: Set(student_id),
        bursary_id: Set(bursary_id),
        application_date: Set(submitted_at),
        current_status: Set(INITIAL_STATUS.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_application(),
        _ => AppError::Database(e),
    })
}

fn duplicate_application() -> AppError {
    AppError::Conflict("You have already applied for this bursary".to_string())
}

fn notification_for(
    student: &student::Model,
    bursary: &bursary::Model,
    event: ApplicationEvent,
) -> ApplicationNotification {
    ApplicationNotification {
        recipient_email: student.email.clone(),
        recipient_name: student.full_name.clone(),
        bursary_title: bursary.title.clone(),
        event,
    }
}

/// Resolve who to notify about an application; `None` when either side is gone
async fn load_context<C: ConnectionTrait>(
    db: &C,
    student_id: i64,
    bursary_id: i64,
    event: ApplicationEvent,
) -> Result<Option<ApplicationNotification>> {
    let student = Student::find_by_id(student_id).one(db).await?;
    let bursary = Bursary::find_by_id(bursary_id).one(db).await?;

    match (student, bursary) {
        (Some(s), Some(b)) => Ok(Some(notification_for(&s, &b, event))),
        _ => {
            tracing::warn!(
                "Notification context missing for student {} / bursary {}",
                student_id,
                bursary_id
            );
            Ok(None)
        }
    }
}

fn unique_ids(ids: impl Iterator<Item = i64>) -> Vec<i64> {
    let mut ids: Vec<i64> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
