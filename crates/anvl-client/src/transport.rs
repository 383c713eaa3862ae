//! `reqwest` implementation of [`LeadTransport`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use anvl_core::error::TransportError;
use anvl_core::lead::ContactPayload;
use anvl_core::submission::LeadTransport;

use crate::error::ClientError;

/// Request timeout used by [`HttpLeadTransport::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Relay error body: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// Posts lead payloads to `{base_url}/api/contact`.
#[derive(Debug, Clone)]
pub struct HttpLeadTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpLeadTransport {
    /// Create a transport for the site at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if `base_url` is blank.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a transport with a custom request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if `base_url` is blank, or
    /// [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ClientError::Config("base URL must not be empty".to_owned()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("anvl-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            endpoint: format!("{base_url}/api/contact"),
            client,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl LeadTransport for HttpLeadTransport {
    async fn send(&self, payload: &ContactPayload) -> Result<(), TransportError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Network {
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "lead accepted by relay");
            return Ok(());
        }

        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .map(|b| b.error)
            .unwrap_or(text);

        Err(TransportError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
