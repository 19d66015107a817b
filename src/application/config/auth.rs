use std::env;

const DEV_JWT_SECRET: &str = "bursary-dev-secret-change-me";

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Lifetime of issued access tokens, in seconds
    pub token_ttl_secs: i64,
    /// When set, admin self-registration must present this code
    pub admin_invite_code: Option<String>,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: env::var("BURSARY_JWT_SECRET")
                .or_else(|_| env::var("JWT_SECRET"))
                .unwrap_or_else(|_| DEV_JWT_SECRET.to_string()),
            token_ttl_secs: env::var("BURSARY_TOKEN_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(86400),
            admin_invite_code: env::var("BURSARY_ADMIN_INVITE_CODE")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}
