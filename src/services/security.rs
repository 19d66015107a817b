use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::CONFIG;
use crate::error::{AppError, Result};
use crate::models::role::Role;

/// JWT token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Account id
    pub role: Role,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    pub fn account_id(&self) -> Result<i64> {
        self.sub
            .parse()
            .map_err(|_| AppError::Unauthorized("Invalid token subject".to_string()))
    }
}

/// Hash a password using bcrypt
pub fn hash_password(password: &str) -> Result<String> {
    hash_password_with_cost(password, bcrypt::DEFAULT_COST)
}

/// Hash a password with an explicit bcrypt cost
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Create a signed access token for an account
pub fn create_access_token(account_id: i64, role: Role, email: &str) -> Result<String> {
    create_token_with_secret(
        account_id,
        role,
        email,
        CONFIG.auth.token_ttl_secs,
        &CONFIG.auth.jwt_secret,
    )
}

fn create_token_with_secret(
    account_id: i64,
    role: Role,
    email: &str,
    ttl_secs: i64,
    secret: &str,
) -> Result<String> {
    let now = Utc::now();
    let exp = now + Duration::seconds(ttl_secs);

    let claims = Claims {
        sub: account_id.to_string(),
        role,
        email: email.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
        jti: uuid::Uuid::new_v4().to_string(),
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    Ok(encode(&Header::new(Algorithm::HS256), &claims, &key)?)
}

/// Decode and validate an access token
pub fn decode_token(token: &str) -> Result<Claims> {
    decode_with_secret(token, &CONFIG.auth.jwt_secret)
}

fn decode_with_secret(token: &str, secret: &str) -> Result<Claims> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}
