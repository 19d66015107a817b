use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use super::{NotificationMessage, NotificationProvider, SendResult};
use crate::config::mail::MailConfig;

pub struct EmailProvider {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    from_name: String,
}

impl EmailProvider {
    pub fn from_config(config: &MailConfig) -> Result<Self, String> {
        let (username, password) = match (&config.username, &config.password) {
            (Some(u), Some(p)) => (u.clone(), p.clone()),
            _ => return Err("SMTP username and password are required".to_string()),
        };

        let creds = Credentials::new(username.clone(), password);

        let transport = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                .map_err(|e| format!("Failed to create SMTP transport: {}", e))?
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .credentials(creds)
                .build()
        };

        Ok(Self {
            transport,
            from_address: username,
            from_name: config.from_name.clone(),
        })
    }

    async fn send_email(&self, to: &str, subject: &str, html: &str) -> SendResult {
        let from = format!("{} <{}>", self.from_name, self.from_address);

        let to_mailbox = match to.parse() {
            Ok(mbox) => mbox,
            Err(_) => {
                return SendResult {
                    success: false,
                    error: Some("Invalid recipient email address".to_string()),
                }
            }
        };

        let from_mailbox = match from.parse() {
            Ok(mbox) => mbox,
            Err(_) => match self.from_address.parse() {
                Ok(mbox) => mbox,
                Err(_) => {
                    return SendResult {
                        success: false,
                        error: Some("Invalid from email address".to_string()),
                    }
                }
            },
        };

        let email = match Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())
        {
            Ok(email) => email,
            Err(e) => {
                return SendResult {
                    success: false,
                    error: Some(format!("Failed to build email: {}", e)),
                }
            }
        };

        match self.transport.send(email).await {
            Ok(_) => SendResult {
                success: true,
                error: None,
            },
            Err(e) => SendResult {
                success: false,
                error: Some(format!("Failed to send email: {}", e)),
            },
        }
    }
}

#[async_trait]
impl NotificationProvider for EmailProvider {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn send(&self, message: &NotificationMessage) -> SendResult {
        self.send_email(&message.recipient, &message.subject, &message.body)
            .await
    }
}
