//! Lead form session: the `idle` / `submitting` state machine.
//!
//! A [`FormSession`] is owned by one page view. A submit cycle is
//! [`FormSession::begin`], one transport send, then [`FormSession::finish`];
//! [`FormSession::submit`] runs all three. While a cycle is open the session
//! reports [`SubmissionState::Submitting`] and refuses to begin another.

use tracing::{debug, warn};

use crate::error::TransportError;
use crate::lead::{Audience, ContactPayload, LeadForm};

/// Message shown when the relay fails for any reason.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Message shown when a submit is attempted while one is in flight.
pub const ALREADY_SUBMITTING: &str = "Your request is already being sent.";

/// Where a session is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient toast shown to the user after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}

/// Whether the form is cleared after a failed submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResetPolicy {
    /// Clear only after success; a failed send keeps what the user typed.
    #[default]
    OnSuccess,
    /// Clear after every completed send, successful or not.
    Always,
}

/// Sends a validated payload to the relay.
#[async_trait::async_trait]
pub trait LeadTransport: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the relay did not accept the payload.
    async fn send(&self, payload: &ContactPayload) -> Result<(), TransportError>;
}

/// One lead form and its submit cycle.
#[derive(Debug)]
pub struct FormSession<T> {
    audience: Audience,
    policy: ResetPolicy,
    form: LeadForm,
    state: SubmissionState,
    transport: T,
}

impl<T: LeadTransport> FormSession<T> {
    #[must_use]
    pub fn new(audience: Audience, transport: T) -> Self {
        Self {
            audience,
            policy: ResetPolicy::default(),
            form: LeadForm::default(),
            state: SubmissionState::Idle,
            transport,
        }
    }

    #[must_use]
    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn audience(&self) -> Audience {
        self.audience
    }

    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    #[must_use]
    pub fn form(&self) -> &LeadForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut LeadForm {
        &mut self.form
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Open a submit cycle.
    ///
    /// Validates the form and moves the session to
    /// [`SubmissionState::Submitting`], returning the payload to send. A
    /// validation failure, or a cycle that is already open, returns the
    /// notification to show instead and leaves the state unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error [`Notification`] when nothing should be sent.
    pub fn begin(&mut self) -> Result<ContactPayload, Notification> {
        if self.state == SubmissionState::Submitting {
            debug!(audience = %self.audience, "submit ignored, one already in flight");
            return Err(Notification::error(ALREADY_SUBMITTING));
        }

        let lead = self.form.validate(self.audience).map_err(|e| {
            debug!(audience = %self.audience, error = %e, "lead form rejected");
            Notification::error(e.to_string())
        })?;

        self.state = SubmissionState::Submitting;
        Ok(lead.to_payload())
    }

    /// Close the submit cycle with the transport's result.
    ///
    /// Returns the session to [`SubmissionState::Idle`]. Success clears the
    /// form; failure clears it only under [`ResetPolicy::Always`].
    pub fn finish(&mut self, result: Result<(), TransportError>) -> Notification {
        self.state = SubmissionState::Idle;

        match result {
            Ok(()) => {
                self.form = LeadForm::default();
                Notification::success(self.audience.success_message())
            }
            Err(e) => {
                warn!(audience = %self.audience, error = %e, "lead submission failed");
                if self.policy == ResetPolicy::Always {
                    self.form = LeadForm::default();
                }
                Notification::error(GENERIC_FAILURE)
            }
        }
    }

    /// Abandon an open cycle without touching the form.
    ///
    /// For callers that dropped the send between [`begin`](Self::begin) and
    /// [`finish`](Self::finish).
    pub fn cancel(&mut self) {
        self.state = SubmissionState::Idle;
    }

    /// Validate and send the form through the session's transport.
    ///
    /// Exactly one send is made when [`begin`](Self::begin) succeeds, and
    /// the session is back in [`SubmissionState::Idle`] when this returns.
    pub async fn submit(&mut self) -> Notification {
        let payload = match self.begin() {
            Ok(payload) => payload,
            Err(note) => return note,
        };
        let result = self.transport.send(&payload).await;
        self.finish(result)
    }
}
