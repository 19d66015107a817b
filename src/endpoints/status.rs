use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::role::Role;
use crate::models::status_update;
use crate::schemas::{HistoryQuery, StatusUpdateRequest, StatusUpdateResponse};
use crate::services::lifecycle::{NewTransition, DEFAULT_ACTION_TYPE};
use crate::state::AppState;
use super::extractors::{AppJson, AppPath, AppQuery};

/// Create status history routes
pub fn status_routes(state: AppState) -> Router {
    Router::new()
        .route("/update", post(record_status_update))
        .route("/{application_id}", get(get_status_history))
        .with_state(state)
}

/// Record a status change for an application
async fn record_status_update(
    State(state): State<AppState>,
    AppJson(req): AppJson<StatusUpdateRequest>,
) -> Result<Json<StatusUpdateResponse>> {
    let transition = into_transition(req)?;

    let result = state.lifecycle.record_transition(transition).await?;

    Ok(Json(StatusUpdateResponse {
        message: "Status updated successfully".to_string(),
        application_id: result.application.id,
        status_update_id: result.update.id,
        current_status: result.application.current_status,
        notification: result.notification,
    }))
}

/// Ordered status history of an application
async fn get_status_history(
    State(state): State<AppState>,
    AppPath(application_id): AppPath<i64>,
    AppQuery(query): AppQuery<HistoryQuery>,
) -> Result<Json<Vec<status_update::Model>>> {
    let history = state
        .lifecycle
        .history(application_id, query.visible_only)
        .await?;
    Ok(Json(history))
}

fn into_transition(req: StatusUpdateRequest) -> Result<NewTransition> {
    req.validate()?;

    let missing = || {
        AppError::Validation(
            "application_id, status, updated_by and updated_by_role are required".to_string(),
        )
    };
    let application_id = req.application_id.ok_or_else(missing)?;
    let updated_by = req.updated_by.ok_or_else(missing)?;
    let status = req
        .status
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(missing)?;
    let role_name = req.updated_by_role.ok_or_else(missing)?;
    let updated_by_role = Role::parse(&role_name).ok_or_else(|| {
        AppError::Validation("updated_by_role must be 'student' or 'admin'".to_string())
    })?;

    Ok(NewTransition {
        application_id,
        status,
        updated_by,
        updated_by_role,
        remarks: req.remarks,
        is_visible_to_student: req.is_visible_to_student.unwrap_or(true),
        action_type: req
            .action_type
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ACTION_TYPE.to_string()),
        attachment_url: req.attachment_url,
    })
}
