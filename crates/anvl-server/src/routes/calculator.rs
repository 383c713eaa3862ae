//! Calculator routes: `/api/roi/*`
//!
//! Stateless wrappers over `anvl_core::calculator`. Bodies are parsed
//! leniently: non-numeric fields count as zero and missing fields take the
//! variant's defaults, so a well-formed JSON object always yields an estimate.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};

use anvl_core::calculator::{
    Calculator, Estimate, GrossLiftInputs, InterestSavingsInputs, LenderRoiInputs,
};

use crate::error::AppError;
use crate::state::AppState;

/// Build the `/api/roi` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/lender", post(lender_roi))
        .route("/interest", post(interest_savings))
        .route("/gross-lift", post(gross_lift))
}

async fn lender_roi(
    body: Result<Json<LenderRoiInputs>, JsonRejection>,
) -> Result<Json<Estimate>, AppError> {
    let Json(inputs) = body?;
    Ok(Json(Calculator::LenderRoi(inputs).estimate()))
}

async fn interest_savings(
    body: Result<Json<InterestSavingsInputs>, JsonRejection>,
) -> Result<Json<Estimate>, AppError> {
    let Json(inputs) = body?;
    Ok(Json(Calculator::InterestSavings(inputs).estimate()))
}

async fn gross_lift(
    body: Result<Json<GrossLiftInputs>, JsonRejection>,
) -> Result<Json<Estimate>, AppError> {
    let Json(inputs) = body?;
    Ok(Json(Calculator::GrossLift(inputs).estimate()))
}
