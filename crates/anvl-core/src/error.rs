//! Error types for `anvl-core`.
//!
//! Validation errors carry the field or audience that failed so callers can
//! render an inline message. Dispatch errors never include the submitter's
//! message body, only status and transport details.

use crate::lead::Audience;

/// Errors from validating a lead form before submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadError {
    /// The consent or acknowledgement checkbox was not ticked.
    #[error("{}", .audience.consent_prompt())]
    ConsentRequired { audience: Audience },

    /// A field required for this audience was blank.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// The email address is not a plausible single mailbox.
    #[error("invalid email address: {reason}")]
    InvalidEmail { reason: &'static str },
}

/// Errors from sending an email through a [`Mailer`](crate::mail::Mailer).
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// The mail service answered with a non-success status.
    #[error("mail service rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The mail service did not answer in time.
    #[error("mail service timed out")]
    Timeout,

    /// Credentials were missing or refused.
    #[error("mail service authentication failed: {reason}")]
    Auth { reason: String },

    /// A sender, recipient or reply-to address could not be parsed.
    #[error("invalid mail address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    /// Network or client failure talking to the mail service.
    #[error("mail transport error: {reason}")]
    Transport { reason: String },
}

/// Errors from relaying a contact payload.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The payload failed server-side checks; no email was attempted.
    #[error("invalid contact payload: {0}")]
    InvalidPayload(#[from] LeadError),

    /// The mailer failed to deliver the message.
    #[error("contact dispatch failed: {0}")]
    Dispatch(#[from] MailError),
}

/// Errors from a [`LeadTransport`](crate::submission::LeadTransport).
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The relay endpoint answered with a non-success status.
    #[error("relay rejected submission with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The relay endpoint could not be reached.
    #[error("relay network error: {reason}")]
    Network { reason: String },
}
