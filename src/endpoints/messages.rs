use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::message;
use crate::models::role::Role;
use crate::schemas::{
    ConversationSummary, MarkReadRequest, MarkReadResponse, SendMessageRequest,
    SendMessageResponse,
};
use crate::services::messaging::{self, OutgoingMessage};
use crate::state::AppState;
use super::extractors::{AppJson, AppPath};

/// Create messaging routes
pub fn message_routes(state: AppState) -> Router {
    Router::new()
        .route("/messages", post(send_message))
        .route("/users/{role}/{user_id}/conversations", get(list_conversations))
        .route("/conversations/{conversation_id}/messages", get(list_messages))
        .route("/conversations/{conversation_id}/read", post(mark_read))
        .with_state(state)
}

/// Send a message between a student and an admin
async fn send_message(
    State(state): State<AppState>,
    AppJson(req): AppJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<SendMessageResponse>)> {
    req.validate()?;

    let (conversation, saved) = messaging::send_message(
        &state.db,
        OutgoingMessage {
            sender_id: req.sender_id,
            sender_role: req.sender_role,
            receiver_id: req.receiver_id,
            content: req.content,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(SendMessageResponse {
            message: "Message sent".to_string(),
            conversation_id: conversation.id,
            data: saved,
        }),
    ))
}

/// Conversations for a student or admin
async fn list_conversations(
    State(state): State<AppState>,
    AppPath((role, user_id)): AppPath<(String, i64)>,
) -> Result<Json<Vec<ConversationSummary>>> {
    let role = Role::parse(&role)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown role '{}'", role)))?;
    Ok(Json(messaging::list_conversations(&state.db, role, user_id).await?))
}

/// Messages in a conversation, oldest first
async fn list_messages(
    State(state): State<AppState>,
    AppPath(conversation_id): AppPath<i64>,
) -> Result<Json<Vec<message::Model>>> {
    Ok(Json(messaging::list_messages(&state.db, conversation_id).await?))
}

/// Mark the reader's incoming messages in a conversation as read
async fn mark_read(
    State(state): State<AppState>,
    AppPath(conversation_id): AppPath<i64>,
    AppJson(req): AppJson<MarkReadRequest>,
) -> Result<Json<MarkReadResponse>> {
    let updated =
        messaging::mark_read(&state.db, conversation_id, req.reader_id, req.reader_role).await?;

    Ok(Json(MarkReadResponse {
        message: "Messages marked as read".to_string(),
        updated,
    }))
}
