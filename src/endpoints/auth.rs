use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DbErr, Set, SqlErr};
use validator::Validate;

use crate::config::CONFIG;
use crate::error::{AppError, Result};
use crate::middleware::AuthenticatedUser;
use crate::models::role::Role;
use crate::models::{admin, student};
use crate::schemas::{
    AccountResponse, LoginRequest, LoginResponse, RegisterAdminRequest, RegisterStudentRequest,
};
use crate::services::accounts::{find_credentials, normalize_email, Account};
use crate::services::{create_access_token, hash_password, verify_password};
use crate::state::AppState;
use super::extractors::AppJson;

/// Create auth routes for registration, login and the current account
pub fn auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/student/register", post(register_student))
        .route("/admin/register", post(register_admin))
        .route("/login", post(login))
        .route("/me", get(get_current_account))
        .with_state(state)
}

/// Register a student account
async fn register_student(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterStudentRequest>,
) -> Result<(StatusCode, Json<AccountResponse>)> {
    req.validate()?;
    let email = normalize_email(&req.email);
    ensure_email_free(&state, Role::Student, &email).await?;

    let created = student::ActiveModel {
        full_name: Set(req.full_name.trim().to_string()),
        email: Set(email),
        hashed_password: Set(hash_password(&req.password)?),
        phone: Set(non_blank(req.phone)),
        institution: Set(non_blank(req.institution)),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(email_taken)?;

    tracing::info!("Registered student {} ({})", created.id, created.email);

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse {
            message: "Student registered successfully".to_string(),
            account: Account::from(created),
        }),
    ))
}

/// Register an admin account, gated by the invite code when one is configured
async fn register_admin(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterAdminRequest>,
) -> Result<(StatusCode, Json<AccountResponse>)> {
    req.validate()?;

    if let Some(expected) = &CONFIG.auth.admin_invite_code {
        if req.invite_code.as_deref().map(str::trim) != Some(expected.as_str()) {
            return Err(AppError::Forbidden("Invalid admin invite code".to_string()));
        }
    }

    let email = normalize_email(&req.email);
    ensure_email_free(&state, Role::Admin, &email).await?;

    let created = admin::ActiveModel {
        full_name: Set(req.full_name.trim().to_string()),
        email: Set(email),
        hashed_password: Set(hash_password(&req.password)?),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(email_taken)?;

    tracing::info!("Registered admin {} ({})", created.id, created.email);

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse {
            message: "Admin registered successfully".to_string(),
            account: Account::from(created),
        }),
    ))
}

/// Exchange credentials for an access token
async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let (account, hash) = find_credentials(&state.db, req.role, &req.email)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&req.password, &hash) {
        tracing::warn!("Failed login for {} {}", req.role, account.email);
        return Err(invalid());
    }

    let token = create_access_token(account.id, account.role, &account.email)?;
    tracing::info!("{} {} logged in", account.role, account.id);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        account,
    }))
}

/// Get the account behind the Bearer token
async fn get_current_account(user: AuthenticatedUser) -> Json<Account> {
    Json(user.0)
}

async fn ensure_email_free(state: &AppState, role: Role, email: &str) -> Result<()> {
    if find_credentials(&state.db, role, email).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "A {} account with this email already exists",
            role
        )));
    }
    Ok(())
}

fn email_taken(e: DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("An account with this email already exists".to_string())
        }
        _ => AppError::Database(e),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

