//! ANVL HTTP server.
//!
//! Wires the core relay and calculator into a running Axum server. Serves the
//! contact relay at `/api/contact`, the calculator at `/api/roi/*`, and a
//! liveness probe at `/health`.

pub mod app;
pub mod config;
pub mod error;
pub mod mailer;
pub mod routes;
pub mod state;
