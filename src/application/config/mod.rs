pub mod auth;
pub mod database;
pub mod mail;
pub mod server;
pub mod storage;

use once_cell::sync::Lazy;
use std::env;
use std::str::FromStr;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server: server::ServerConfig,
    pub database: database::DatabaseConfig,
    pub auth: auth::AuthConfig,
    pub mail: mail::MailConfig,
    pub storage: storage::StorageConfig,

    // Build info
    pub version: String,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server: server::ServerConfig::from_env(),
            database: database::DatabaseConfig::from_env(),
            auth: auth::AuthConfig::from_env(),
            mail: mail::MailConfig::from_env(),
            storage: storage::StorageConfig::from_env(),

            version: env!("CARGO_PKG_VERSION").to_string(),

            log_level: env::var("BURSARY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

/// First of `keys` that is set and parses as `T`, else `default`
pub(crate) fn env_parse<T: FromStr>(keys: &[&str], default: T) -> T {
    keys.iter()
        .find_map(|key| env::var(key).ok().and_then(|v| v.trim().parse().ok()))
        .unwrap_or(default)
}

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
