//! Bearer-token authentication extractors
//!
//! Handlers that need a caller take [`AuthenticatedUser`] or [`AdminUser`]
//! as an argument. The token is validated and the account is confirmed to
//! still exist before the handler runs.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::error::{AppError, Result};
use crate::models::role::Role;
use crate::services::accounts::{find_account, Account};
use crate::services::security::decode_token;
use crate::state::AppState;

/// Authenticated account, cached in request extensions once resolved
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Account);

impl AuthenticatedUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }

    pub fn role(&self) -> Role {
        self.0.role
    }
}

/// Validate the Bearer token in `headers` and load the account it names
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Account> {
    let token = extract_bearer_token(headers).ok_or_else(|| {
        AppError::Unauthorized("Missing or invalid Authorization header".to_string())
    })?;

    let claims = decode_token(token)?;
    let account_id = claims.account_id()?;

    find_account(&state.db, claims.role, account_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Account no longer exists".to_string()))
}

/// Extract Bearer token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_str = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(user.clone());
        }

        let user = AuthenticatedUser(authenticate(state, &parts.headers).await?);
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

/// Extractor for an authenticated admin
///
/// Returns 401 without a valid token and 403 for a student token.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Account);

impl AdminUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        if user.role() != Role::Admin {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }
        Ok(AdminUser(user.0))
    }
}
