//! SMTP mail backend.
//!
//! Delivers an [`OutboundEmail`] through an SMTP relay (Gmail by default)
//! using the `EMAIL_USER` / `EMAIL_PASS` login. One connection per email;
//! nothing is queued or retried here.

use anvl_core::error::MailError;
use anvl_core::mail::{Mailer, OutboundEmail};
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::{SmtpMailConfig, SmtpSecurity};

/// Mailer that submits to an SMTP relay.
pub struct SmtpMailer {
    host: String,
    port: u16,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build a mailer from configuration. No connection is made until the
    /// first send.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Transport`] if the TLS parameters for `host`
    /// cannot be built.
    pub fn new(config: &SmtpMailConfig) -> Result<Self, MailError> {
        let builder = match config.security {
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host),
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            }
            SmtpSecurity::None => Ok(AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(
                &config.host,
            )),
        }
        .map_err(|e| MailError::Transport {
            reason: e.to_string(),
        })?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(config.user.clone(), config.pass.clone()))
            .timeout(Some(config.timeout))
            .build();

        Ok(Self {
            host: config.host.clone(),
            port: config.port,
            transport,
        })
    }
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let message = build_message(email)?;
        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| classify(&e))
    }
}

fn mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse()
        .map_err(|e: lettre::address::AddressError| MailError::InvalidAddress {
            address: address.to_owned(),
            reason: e.to_string(),
        })
}

fn build_message(email: &OutboundEmail) -> Result<Message, MailError> {
    Message::builder()
        .from(mailbox(&email.from)?)
        .reply_to(mailbox(&email.reply_to)?)
        .to(mailbox(&email.to)?)
        .subject(email.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(email.text.clone())
        .map_err(|e| MailError::Transport {
            reason: e.to_string(),
        })
}

/// Map an SMTP failure onto [`MailError`].
///
/// 53x replies (authentication required or refused) are credential problems.
/// Any other negative reply is a rejection carrying its code.
fn classify(e: &lettre::transport::smtp::Error) -> MailError {
    if e.is_timeout() {
        return MailError::Timeout;
    }

    let code = e.status().map(|c| c.to_string());
    match code.as_deref() {
        Some(c) if c.starts_with("53") => MailError::Auth {
            reason: e.to_string(),
        },
        Some(c) => MailError::Rejected {
            status: c.parse().unwrap_or_default(),
            body: e.to_string(),
        },
        None => MailError::Transport {
            reason: e.to_string(),
        },
    }
}
