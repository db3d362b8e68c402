use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use capgen_store::Store;
use http::StatusCode;
use serde_json::json;

/// State for the health endpoint
#[derive(Clone)]
pub struct HealthState {
    /// Probed when present; a caption-only deployment has no store
    pub store: Option<Arc<dyn Store>>,
}

/// Health check handler
///
/// Reports unhealthy when the store probe fails, so load balancers
/// stop routing to an instance that lost its database.
pub async fn health_handler(State(state): State<HealthState>) -> Response {
    if let Some(store) = &state.store
        && let Err(e) = store.ping().await
    {
        tracing::error!(error = %e, "health check failed");
        return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "status": "unhealthy" }))).into_response();
    }

    Json(json!({ "status": "healthy" })).into_response()
}
