//! Integration tests for the ANVL HTTP API.
//!
//! These drive the real router in-process with `tower::ServiceExt::oneshot`
//! and swap the mail dependency for a recording mailer, so no network or
//! mail account is needed.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use tokio::sync::Mutex;
use tower::ServiceExt;

use anvl_core::error::MailError;
use anvl_core::mail::{Mailer, OutboundEmail};
use anvl_core::relay::RelaySettings;
use anvl_server::app::build_router;
use anvl_server::state::AppState;

#[derive(Default)]
struct RecordingMailer {
    fail: bool,
    calls: AtomicUsize,
    sent: Mutex<Vec<OutboundEmail>>,
}

#[async_trait::async_trait]
impl Mailer for RecordingMailer {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(MailError::Timeout);
        }
        self.sent.lock().await.push(email.clone());
        Ok(())
    }
}

fn app_with(mailer: &Arc<RecordingMailer>) -> Router {
    let state = AppState::new(
        Arc::clone(mailer) as Arc<dyn Mailer>,
        RelaySettings::default(),
    );
    build_router(Arc::new(state))
}

async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

// ── Contact relay ────────────────────────────────────────────────────

#[tokio::test]
async fn contact_success_returns_200_and_sends_once() {
    let mailer = Arc::new(RecordingMailer::default());
    let (status, body) = post_json(
        app_with(&mailer),
        "/api/contact",
        r#"{"name":"Dana Reyes","email":"dana@firstfloorplan.com","message":"Pilot?"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "success": true }));
    assert_eq!(mailer.calls.load(Ordering::SeqCst), 1);

    let sent = mailer.sent.lock().await;
    assert_eq!(sent[0].reply_to, "dana@firstfloorplan.com");
    assert_eq!(sent[0].subject, "New Contact Form Submission");
    assert!(sent[0].text.contains("Name: Dana Reyes"));
    assert!(sent[0].text.contains("Message:\nPilot?"));
}

#[tokio::test]
async fn contact_mailer_failure_returns_500() {
    let mailer = Arc::new(RecordingMailer {
        fail: true,
        ..RecordingMailer::default()
    });
    let (status, body) = post_json(
        app_with(&mailer),
        "/api/contact",
        r#"{"name":"Dana","email":"dana@example.com","message":"hi"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({ "error": "Failed to send message" }));
    assert_eq!(mailer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn contact_invalid_email_returns_400_without_sending() {
    let mailer = Arc::new(RecordingMailer::default());
    let (status, body) = post_json(
        app_with(&mailer),
        "/api/contact",
        r#"{"name":"Dana","email":"dana\r\nBcc: everyone@example.com","message":"hi"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid email"));
    assert_eq!(mailer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn contact_missing_email_returns_400_without_sending() {
    let mailer = Arc::new(RecordingMailer::default());
    let (status, body) = post_json(
        app_with(&mailer),
        "/api/contact",
        r#"{"name":"A","message":"m"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(mailer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn contact_blank_email_returns_400_without_sending() {
    let mailer = Arc::new(RecordingMailer::default());
    let (status, body) = post_json(
        app_with(&mailer),
        "/api/contact",
        r#"{"name":"A","email":"","message":"m"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid email"));
    assert_eq!(mailer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn contact_malformed_json_returns_400() {
    let mailer = Arc::new(RecordingMailer::default());
    let (status, body) = post_json(app_with(&mailer), "/api/contact", "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(mailer.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn contact_get_is_not_allowed() {
    let mailer = Arc::new(RecordingMailer::default());
    let req = Request::builder()
        .uri("/api/contact")
        .body(Body::empty())
        .unwrap();
    let resp = app_with(&mailer).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ── Calculator ───────────────────────────────────────────────────────

#[tokio::test]
async fn lender_roi_worked_example() {
    let mailer = Arc::new(RecordingMailer::default());
    let (status, body) = post_json(
        app_with(&mailer),
        "/api/roi/lender",
        r#"{"avgUnitsOnBook":15000,"perUnitMonthlyCost":10,
            "manualAuditCostPerYear":5400000,"baselineLossesPerYear":2000000,
            "lossAvoidancePct":25}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["variant"], "lender-roi");
    assert_eq!(body["annualPlatformCost"], 1_800_000);
    assert_eq!(body["auditSavings"], 3_600_000);
    assert_eq!(body["lossAvoidance"], 500_000);
    assert_eq!(body["totalBenefit"], 4_100_000);
}

#[tokio::test]
async fn lender_roi_clamps_pct_and_coerces_text() {
    let mailer = Arc::new(RecordingMailer::default());
    let (status, body) = post_json(
        app_with(&mailer),
        "/api/roi/lender",
        r#"{"avgUnitsOnBook":"abc","perUnitMonthlyCost":10,
            "manualAuditCostPerYear":1000,"baselineLossesPerYear":2000000,
            "lossAvoidancePct":150}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["annualPlatformCost"], 0);
    assert_eq!(body["auditSavings"], 1000);
    assert_eq!(body["lossAvoidance"], 2_000_000);
}

#[tokio::test]
async fn interest_and_gross_lift_variants() {
    let mailer = Arc::new(RecordingMailer::default());
    let (_, interest) = post_json(
        app_with(&mailer),
        "/api/roi/interest",
        r#"{"exposure":12000000,"aprReductionBps":50}"#,
    )
    .await;
    assert_eq!(interest["variant"], "interest-savings");
    assert_eq!(interest["monthlyInterestSavings"], 5000);
    assert_eq!(interest["annualInterestSavings"], 60000);

    let (_, gross) = post_json(
        app_with(&mailer),
        "/api/roi/gross-lift",
        r#"{"deltaTurns":0.5,"vehiclesOnFloor":200,"avgGrossPerVehicle":2500}"#,
    )
    .await;
    assert_eq!(gross["variant"], "gross-lift");
    assert_eq!(gross["grossLift"], 250_000);
}

// ── Health & headers ─────────────────────────────────────────────────

#[tokio::test]
async fn health_reports_ok_with_security_headers() {
    let mailer = Arc::new(RecordingMailer::default());
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let resp = app_with(&mailer).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(resp.headers()[header::X_FRAME_OPTIONS], "DENY");
    assert_eq!(resp.headers()[header::CACHE_CONTROL], "no-store");

    let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}
