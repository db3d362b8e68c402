use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::State,
    routing::{get, post},
};
use capgen_core::CurrentUser;
use serde::Serialize;

use crate::{LimitCheck, Result, SubscriptionSummary, UsageLedger};

/// Create the endpoint router for quota accounting
///
/// All three routes sit behind the bearer-auth middleware; handlers
/// read the verified identity from request extensions.
pub fn endpoint_router() -> Router<Arc<UsageLedger>> {
    Router::new()
        .route("/subscription", get(subscription))
        .route("/caption/decrement", post(decrement))
        .route("/caption/check-limit", get(check_limit))
}

#[derive(Serialize)]
struct DecrementResponse {
    success: bool,
    captions_generated: i32,
}

async fn subscription(
    State(ledger): State<Arc<UsageLedger>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<SubscriptionSummary>> {
    let summary = ledger.summary(user.id).await?;

    Ok(Json(summary))
}

/// Consume one caption from the period quota
///
/// Kept deliberately check-free; the caller decides whether to gate on
/// `check_limit` first.
async fn decrement(
    State(ledger): State<Arc<UsageLedger>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<DecrementResponse>> {
    let captions_generated = ledger.increment_usage(user.id).await?;

    Ok(Json(DecrementResponse {
        success: true,
        captions_generated,
    }))
}

async fn check_limit(
    State(ledger): State<Arc<UsageLedger>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<LimitCheck>> {
    let check = ledger.check_limit(user.id).await?;

    Ok(Json(check))
}
