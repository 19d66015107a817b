use std::env;

use super::env_parse;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS. Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("BURSARY_API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_parse(&["BURSARY_API_PORT", "PORT"], 5000),
            allowed_origins: parse_origins(&env::var("BURSARY_ALLOWED_ORIGINS").unwrap_or_default()),
        }
    }

    /// `host:port` to bind the listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
