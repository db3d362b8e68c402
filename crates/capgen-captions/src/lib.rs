#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod error;
mod http_client;
mod prompt;
mod provider;
mod request;
mod server;
mod types;

use std::sync::Arc;

use axum::{Json, Router, extract::DefaultBodyLimit, extract::State, routing::post};

pub use error::{CaptionError, Result};
pub use server::{CaptionServerBuilder, Server};
pub use types::{CaptionLength, CaptionRequest, CaptionResponse, MediaKind, Tone};
use request::ExtractCaptionRequest;

/// Body limit for media uploads (32 MiB)
const BODY_LIMIT_BYTES: usize = 32 << 20;

/// Build the caption server from configuration
///
/// # Errors
///
/// Returns an error if provider initialization fails
pub fn build_server(config: &capgen_config::CaptionsConfig) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        CaptionServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to initialize caption server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for caption generation
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/generate-captions", post(generate_captions))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}

/// Handle caption generation requests
async fn generate_captions(
    State(server): State<Arc<Server>>,
    ExtractCaptionRequest(request): ExtractCaptionRequest,
) -> Result<Json<CaptionResponse>> {
    tracing::debug!(
        media_kind = %request.media_kind,
        tone = %request.tone,
        length = %request.length,
        "caption generation handler called"
    );

    let response = server.generate(request).await?;

    Ok(Json(response))
}
