mod email;
mod templates;

pub use email::EmailProvider;
pub use templates::{render, RenderedEmail};

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::config::mail::MailConfig;

/// What happened to an application, from the student's point of view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationEvent {
    Submitted,
    Withdrawn,
    StatusChanged {
        status: String,
        remarks: Option<String>,
    },
}

impl ApplicationEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ApplicationEvent::Submitted => "submitted",
            ApplicationEvent::Withdrawn => "withdrawn",
            ApplicationEvent::StatusChanged { .. } => "status_changed",
        }
    }
}

/// Everything needed to tell a student about an application event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationNotification {
    pub recipient_email: String,
    pub recipient_name: String,
    pub bursary_title: String,
    pub event: ApplicationEvent,
}

/// Rendered message handed to a provider
#[derive(Debug, Clone)]
pub struct NotificationMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Result of sending a notification
#[derive(Debug)]
pub struct SendResult {
    pub success: bool,
    pub error: Option<String>,
}

/// Whether a notification was handed off for delivery.
///
/// Delivery itself happens after the response is sent, so `Queued` says
/// nothing about whether the email arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationOutcome {
    Queued,
    Skipped,
}

/// Trait for notification providers
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn send(&self, message: &NotificationMessage) -> SendResult;
}

/// Sends application notifications on detached tasks
#[derive(Clone, Default)]
pub struct NotificationService {
    provider: Option<Arc<dyn NotificationProvider>>,
}

impl NotificationService {
    /// A service with no provider; notifications are logged and dropped
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_provider(provider: Arc<dyn NotificationProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Build the SMTP provider from config, or a disabled service when
    /// credentials are missing or the transport cannot be created
    pub fn from_config(config: &MailConfig) -> Self {
        if !config.is_enabled() {
            tracing::info!("Mail credentials not configured, email notifications disabled");
            return Self::new();
        }

        match EmailProvider::from_config(config) {
            Ok(provider) => {
                tracing::info!("Email notification provider initialized ({})", config.smtp_host);
                Self::with_provider(Arc::new(provider))
            }
            Err(e) => {
                tracing::warn!("Failed to initialize email provider: {}", e);
                Self::new()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Render and send a notification without blocking the caller.
    ///
    /// Failures are logged inside the spawned task and never reach the caller.
    pub fn dispatch(&self, notification: ApplicationNotification) -> JoinHandle<()> {
        let provider = self.provider.clone();

        tokio::spawn(async move {
            let kind = notification.event.kind();
            let rendered = render(&notification);
            let message = NotificationMessage {
                recipient: notification.recipient_email,
                subject: rendered.subject,
                body: rendered.html,
            };

            let Some(provider) = provider else {
                tracing::info!(
                    "Email delivery disabled, dropping '{}' notification for {}",
                    kind,
                    message.recipient
                );
                return;
            };

            let result = provider.send(&message).await;
            if result.success {
                tracing::info!(
                    "Sent '{}' notification to {} via {}",
                    kind,
                    message.recipient,
                    provider.name()
                );
            } else {
                tracing::warn!(
                    "Failed to send '{}' notification to {} via {}: {}",
                    kind,
                    message.recipient,
                    provider.name(),
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
        })
    }
}
