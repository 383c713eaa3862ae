//! Router assembly and mailer selection.

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use anvl_core::error::MailError;
use anvl_core::mail::{LogMailer, Mailer};

use crate::config::{MailTransport, ServerConfig};
use crate::mailer::SmtpMailer;
use crate::routes;
use crate::state::AppState;

/// Build the mailer selected by `config`.
///
/// # Errors
///
/// Returns an error if the SMTP transport cannot be constructed.
pub fn build_mailer(config: &ServerConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match &config.mail_transport {
        MailTransport::Log => {
            warn!("using log mailer (contact emails will not be delivered)");
            Ok(Arc::new(LogMailer))
        }
        MailTransport::Smtp(smtp) => {
            info!(
                host = %smtp.host,
                port = smtp.port,
                security = ?smtp.security,
                "using SMTP relay"
            );
            Ok(Arc::new(SmtpMailer::new(smtp)?))
        }
    }
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    // The forms post cross-origin from the static site.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api/contact", routes::contact::router())
        .nest("/api/roi", routes::calculator::router())
        .nest("/health", routes::health::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(state)
}
