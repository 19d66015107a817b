use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{application, status_update};
use crate::services::notification::NotificationOutcome;

/// Body for both submitting and withdrawing an application
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApplicationPairRequest {
    #[validate(required(message = "is required"), range(min = 1, message = "must be a positive id"))]
    pub student_id: Option<i64>,
    #[validate(required(message = "is required"), range(min = 1, message = "must be a positive id"))]
    pub bursary_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationActionResponse {
    pub message: String,
    pub application_id: i64,
    pub current_status: String,
    pub notification: NotificationOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct WithdrawResponse {
    pub message: String,
    pub application_id: i64,
    pub notification: NotificationOutcome,
}

/// An application as shown to administrators, with its full history
#[derive(Debug, Clone, Serialize)]
pub struct AdminApplicationView {
    #[serde(flatten)]
    pub application: application::Model,
    pub student_name: Option<String>,
    pub student_email: Option<String>,
    pub bursary_title: Option<String>,
    pub status_history: Vec<status_update::Model>,
}

/// An application as shown to its student, with student-visible history only
#[derive(Debug, Clone, Serialize)]
pub struct StudentApplicationView {
    #[serde(flatten)]
    pub application: application::Model,
    pub bursary_title: Option<String>,
    pub bursary_provider: Option<String>,
    pub status_history: Vec<status_update::Model>,
}
