use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::notification::NotificationOutcome;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StatusUpdateRequest {
    #[validate(required(message = "is required"), range(min = 1, message = "must be a positive id"))]
    pub application_id: Option<i64>,
    #[validate(required(message = "is required"), length(min = 1, message = "must not be empty"))]
    pub status: Option<String>,
    #[validate(required(message = "is required"))]
    pub updated_by: Option<i64>,
    #[validate(required(message = "is required"), length(min = 1, message = "must not be empty"))]
    pub updated_by_role: Option<String>,
    pub remarks: Option<String>,
    pub is_visible_to_student: Option<bool>,
    pub action_type: Option<String>,
    pub attachment_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub visible_only: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdateResponse {
    pub message: String,
    pub application_id: i64,
    pub status_update_id: i64,
    pub current_status: String,
    pub notification: NotificationOutcome,
}
