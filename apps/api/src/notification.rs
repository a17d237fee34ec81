//! # Registration Notifications
//!
//! [`Notifier`] adapters.
//!
//! ```text
//! notification.enabled = true   ──► SmtpNotifier  (lettre, async SMTP)
//! notification.enabled = false  ──► LogNotifier   (log line only)
//! ```
//!
//! Delivery is best-effort: failures are logged and reported as `false`,
//! never as errors.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use petvax_core::Notifier;
use tracing::{info, warn};

use crate::config::{ConfigError, NotificationSettings};

/// Subject line of the registration email.
pub const REGISTRATION_SUBJECT: &str = "Your pet has been registered";

/// SMTP command timeout.
const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Body of the registration email.
pub fn registration_body(pet_name: &str) -> String {
    format!("{pet_name} has been registered for vaccination.")
}

// =============================================================================
// SMTP
// =============================================================================

/// Sends registration emails over SMTP.
#[derive(Clone)]
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    /// Builds the transport. No connection is opened until the first send.
    pub fn new(settings: &NotificationSettings) -> Result<Self, NotificationError> {
        let from = settings.from_mailbox()?;

        let builder = if settings.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_host)
                .map_err(|e| NotificationError::Transport(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.smtp_host)
        };

        let builder = builder
            .port(settings.smtp_port)
            .timeout(Some(SMTP_TIMEOUT));

        let builder = match (&settings.smtp_username, &settings.smtp_password) {
            (Some(user), Some(password)) => {
                builder.credentials(Credentials::new(user.clone(), password.clone()))
            }
            _ => builder,
        };

        info!(
            host = %settings.smtp_host,
            port = settings.smtp_port,
            starttls = settings.starttls,
            "SMTP notifier configured"
        );

        Ok(SmtpNotifier {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify_registration(&self, contact_address: &str, pet_name: &str) -> bool {
        let to: Mailbox = match contact_address.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                warn!(to = %contact_address, error = %e, "Invalid recipient address");
                return false;
            }
        };

        let message = match Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(REGISTRATION_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(registration_body(pet_name))
        {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "Failed to build registration email");
                return false;
            }
        };

        match self.transport.send(message).await {
            Ok(_) => {
                info!(to = %contact_address, pet = %pet_name, "Registration email sent");
                true
            }
            Err(e) => {
                warn!(to = %contact_address, error = %e, "Registration email failed");
                false
            }
        }
    }
}

// =============================================================================
// Log only
// =============================================================================

/// Stands in for email delivery when notifications are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify_registration(&self, contact_address: &str, pet_name: &str) -> bool {
        info!(
            to = %contact_address,
            subject = REGISTRATION_SUBJECT,
            body = %registration_body(pet_name),
            "Registration notification (delivery disabled)"
        );
        true
    }
}

/// Notifier setup errors.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("SMTP transport: {0}")]
    Transport(String),
}
