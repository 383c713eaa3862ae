//! Contact relay.
//!
//! Accepts a [`ContactPayload`], checks the submitter address, and forwards
//! one email through the configured [`Mailer`]. Failures are logged here and
//! returned to the caller; nothing is retried or stored.

use std::sync::Arc;

use tracing::{error, info};

use crate::error::RelayError;
use crate::lead::{ContactPayload, validate_email};
use crate::mail::{Mailer, compose_contact_email};

/// Addressing for relayed contact emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaySettings {
    pub from: String,
    pub to: String,
    pub subject: String,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            from: "\"ANVL Website\" <contact@anvllabs.io>".to_owned(),
            to: "contact@anvllabs.io".to_owned(),
            subject: "New Contact Form Submission".to_owned(),
        }
    }
}

/// Forwards contact submissions to a mailer.
#[derive(Clone)]
pub struct ContactRelay {
    mailer: Arc<dyn Mailer>,
    settings: RelaySettings,
}

impl ContactRelay {
    #[must_use]
    pub fn new(mailer: Arc<dyn Mailer>, settings: RelaySettings) -> Self {
        Self { mailer, settings }
    }

    #[must_use]
    pub fn settings(&self) -> &RelaySettings {
        &self.settings
    }

    /// Relay one submission.
    ///
    /// # Errors
    ///
    /// - [`RelayError::InvalidPayload`] if the email address is blank or
    ///   implausible; the mailer is not called.
    /// - [`RelayError::Dispatch`] if the mailer fails.
    pub async fn relay(&self, payload: &ContactPayload) -> Result<(), RelayError> {
        validate_email(&payload.email)?;

        let lead_id = uuid::Uuid::new_v4();
        let domain = email_domain(&payload.email);
        let email = compose_contact_email(payload, &self.settings);

        match self.mailer.send(&email).await {
            Ok(()) => {
                info!(%lead_id, domain, mailer = self.mailer.name(), "contact relayed");
                Ok(())
            }
            Err(e) => {
                error!(
                    %lead_id,
                    domain,
                    mailer = self.mailer.name(),
                    error = %e,
                    "contact relay failed"
                );
                Err(RelayError::Dispatch(e))
            }
        }
    }
}

impl std::fmt::Debug for ContactRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactRelay")
            .field("mailer", &self.mailer.name())
            .field("settings", &self.settings)
            .finish()
    }
}

fn email_domain(email: &str) -> &str {
    email.trim().rsplit_once('@').map_or("", |(_, d)| d)
}
