//! Outbound email and the mailer seam.
//!
//! The relay never talks to a mail service directly. It composes an
//! [`OutboundEmail`] and hands it to whatever [`Mailer`] the server was
//! configured with.

use serde::Serialize;
use tracing::info;

use crate::error::MailError;
use crate::lead::ContactPayload;
use crate::relay::RelaySettings;

/// A fully addressed plain-text email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    /// Replies go to the person who filled in the form.
    pub reply_to: String,
    pub subject: String,
    pub text: String,
}

/// Build the notification email for a contact submission.
#[must_use]
pub fn compose_contact_email(payload: &ContactPayload, settings: &RelaySettings) -> OutboundEmail {
    let email = payload.email.trim();
    let text = format!(
        "Name: {name}\nEmail: {email}\n\nMessage:\n{message}\n",
        name = payload.name.trim(),
        message = payload.message.trim_end(),
    );

    OutboundEmail {
        from: settings.from.clone(),
        to: settings.to.clone(),
        reply_to: email.to_owned(),
        subject: settings.subject.clone(),
        text,
    }
}

/// Trait for email dispatch backends.
///
/// Implementations must be safe to share across async tasks.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    /// The backend's name (for logs).
    fn name(&self) -> &str;

    /// Send one email. Implementations do not retry.
    ///
    /// # Errors
    ///
    /// Returns a [`MailError`] if the message was not accepted.
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

/// Development mailer: writes the email to the log and reports success.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait::async_trait]
impl Mailer for LogMailer {
    fn name(&self) -> &str {
        "log"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        info!(
            to = %email.to,
            subject = %email.subject,
            bytes = email.text.len(),
            "email not sent (log mailer)"
        );
        Ok(())
    }
}
