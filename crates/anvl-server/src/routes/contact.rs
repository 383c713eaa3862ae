//! Contact relay route: `POST /api/contact`
//!
//! Accepts `{ name, email, message }` and forwards it as an email. Answers
//! `200 {"success": true}` on delivery and `500 {"error": ...}` when the mail
//! dependency fails.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use anvl_core::lead::ContactPayload;

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/api/contact` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", post(submit_contact))
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
}

/// Relay one contact submission.
async fn submit_contact(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<Json<ContactResponse>, AppError> {
    let Json(payload) = body?;
    state.relay.relay(&payload).await?;
    Ok(Json(ContactResponse { success: true }))
}
