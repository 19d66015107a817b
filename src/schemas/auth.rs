use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::role::Role;
use crate::services::accounts::Account;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterStudentRequest {
    #[validate(length(min = 1, max = 200, message = "must not be empty"))]
    pub full_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
    pub phone: Option<String>,
    pub institution: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterAdminRequest {
    #[validate(length(min = 1, max = 200, message = "must not be empty"))]
    pub full_name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
    pub invite_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub message: String,
    pub account: Account,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub account: Account,
}
