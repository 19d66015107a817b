use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::schemas::{
    AdminApplicationView, ApplicationActionResponse, ApplicationPairRequest,
    StudentApplicationView, WithdrawResponse,
};
use crate::state::AppState;
use super::extractors::{AppJson, AppPath};

/// Create application lifecycle routes
pub fn application_routes(state: AppState) -> Router {
    Router::new()
        .route("/applications", post(submit_application))
        .route("/applications/withdraw", post(withdraw_application))
        .route("/admin/applications", get(list_all_applications))
        .route("/student/{student_id}/applications", get(list_student_applications))
        .with_state(state)
}

/// Submit an application for a bursary
async fn submit_application(
    State(state): State<AppState>,
    payload: AppJson<ApplicationPairRequest>,
) -> Result<(StatusCode, Json<ApplicationActionResponse>)> {
    let (student_id, bursary_id) = parse_pair(payload)?;

    let submission = state.lifecycle.submit(student_id, bursary_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApplicationActionResponse {
            message: "Application submitted successfully".to_string(),
            application_id: submission.application.id,
            current_status: submission.application.current_status,
            notification: submission.notification,
        }),
    ))
}

/// Withdraw (delete) a student's application for a bursary
async fn withdraw_application(
    State(state): State<AppState>,
    payload: AppJson<ApplicationPairRequest>,
) -> Result<Json<WithdrawResponse>> {
    let (student_id, bursary_id) = parse_pair(payload)?;

    let withdrawal = state.lifecycle.withdraw(student_id, bursary_id).await?;
    state.documents.remove_all(&withdrawal.removed_files).await;

    Ok(Json(WithdrawResponse {
        message: "Application withdrawn successfully".to_string(),
        application_id: withdrawal.application_id,
        notification: withdrawal.notification,
    }))
}

/// Every application with student, bursary and full history
async fn list_all_applications(
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminApplicationView>>> {
    Ok(Json(state.lifecycle.admin_view().await?))
}

/// A student's applications with the history they are allowed to see
async fn list_student_applications(
    State(state): State<AppState>,
    AppPath(student_id): AppPath<i64>,
) -> Result<Json<Vec<StudentApplicationView>>> {
    Ok(Json(state.lifecycle.student_view(student_id).await?))
}

fn parse_pair(AppJson(req): AppJson<ApplicationPairRequest>) -> Result<(i64, i64)> {
    req.validate()?;

    match (req.student_id, req.bursary_id) {
        (Some(student_id), Some(bursary_id)) => Ok((student_id, bursary_id)),
        _ => Err(AppError::Validation(
            "student_id and bursary_id are required".to_string(),
        )),
    }
}
