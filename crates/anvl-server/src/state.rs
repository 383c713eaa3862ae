//! Shared application state for the ANVL server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. It only holds the contact relay; the calculator
//! endpoints are stateless.

use std::sync::Arc;

use anvl_core::mail::Mailer;
use anvl_core::relay::{ContactRelay, RelaySettings};

/// Shared application state passed to all HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    /// Forwards contact submissions to the configured mailer.
    pub relay: ContactRelay,
}

impl AppState {
    #[must_use]
    pub fn new(mailer: Arc<dyn Mailer>, settings: RelaySettings) -> Self {
        Self {
            relay: ContactRelay::new(mailer, settings),
        }
    }
}
