//! Error types for the ANVL client.

/// Errors building an [`HttpLeadTransport`](crate::HttpLeadTransport).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Missing or malformed configuration.
    #[error("anvl client config error: {0}")]
    Config(String),

    /// The underlying HTTP client could not be built.
    #[error("anvl client http error: {0}")]
    Http(#[from] reqwest::Error),
}
