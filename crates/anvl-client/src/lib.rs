//! HTTP transport for ANVL lead forms.
//!
//! Plugs a [`FormSession`](anvl_core::submission::FormSession) into the
//! contact relay endpoint.
//!
//! # Example
//!
//! ```rust,no_run
//! use anvl_client::HttpLeadTransport;
//! use anvl_core::lead::Audience;
//! use anvl_core::submission::FormSession;
//!
//! # async fn example() -> Result<(), anvl_client::ClientError> {
//! let transport = HttpLeadTransport::new("https://anvllabs.io")?;
//! let mut session = FormSession::new(Audience::Lender, transport);
//! session.form_mut().consent = true;
//! let notification = session.submit().await;
//! # let _ = notification;
//! # Ok(())
//! # }
//! ```

mod error;
mod transport;

pub use error::ClientError;
pub use transport::{DEFAULT_TIMEOUT, HttpLeadTransport};
