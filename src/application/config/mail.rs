use std::env;

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_name: String,
    pub use_tls: bool,
}

impl MailConfig {
    pub fn from_env() -> Self {
        Self {
            smtp_host: env::var("BURSARY_SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            smtp_port: env::var("BURSARY_SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            username: env::var("BURSARY_MAIL_USER")
                .or_else(|_| env::var("MAIL_USER"))
                .ok()
                .filter(|v| !v.is_empty()),
            password: env::var("BURSARY_MAIL_PASS")
                .or_else(|_| env::var("MAIL_PASS"))
                .ok()
                .filter(|v| !v.is_empty()),
            from_name: env::var("BURSARY_MAIL_FROM_NAME")
                .unwrap_or_else(|_| "Bursary Portal".to_string()),
            use_tls: env::var("BURSARY_SMTP_TLS")
                .map(|v| v.to_lowercase() != "false")
                .unwrap_or(true),
        }
    }

    /// Email delivery is only attempted when SMTP credentials are present
    pub fn is_enabled(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}
