use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::message;
use crate::models::role::Role;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    pub sender_id: i64,
    pub sender_role: Role,
    pub receiver_id: i64,
    #[validate(length(min = 1, max = 5000, message = "must be between 1 and 5000 characters"))]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarkReadRequest {
    pub reader_id: i64,
    pub reader_role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendMessageResponse {
    pub message: String,
    pub conversation_id: i64,
    pub data: message::Model,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary {
    pub id: i64,
    pub student_id: i64,
    pub admin_id: i64,
    pub counterpart_id: i64,
    pub counterpart_name: Option<String>,
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub unread_count: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkReadResponse {
    pub message: String,
    pub updated: u64,
}
