//! Mock upstream model server for integration tests
//!
//! Serves a minimal Gemini-compatible `generateContent` endpoint and a
//! Whisper-compatible transcription endpoint with canned responses.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::State;
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Mock model backend that returns predictable responses
pub struct MockModel {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockModelState>,
}

struct MockModelState {
    description_count: AtomicU32,
    generation_count: AtomicU32,
    transcription_count: AtomicU32,
    captions: String,
}

const DEFAULT_CAPTIONS: &str = "\u{2022} Sunshine and good vibes \u{2600}\u{fe0f} #weekend #goldenhour";

impl MockModel {
    /// Start the mock server with the default canned captions
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with_captions(DEFAULT_CAPTIONS).await
    }

    /// Start a mock server that answers caption prompts with `captions`
    pub async fn start_with_captions(captions: &str) -> anyhow::Result<Self> {
        let state = Arc::new(MockModelState {
            description_count: AtomicU32::new(0),
            generation_count: AtomicU32::new(0),
            transcription_count: AtomicU32::new(0),
            captions: captions.to_string(),
        });

        let app = Router::new()
            .route("/models/{model}", routing::post(handle_generate_content))
            .route("/audio/transcriptions", routing::post(handle_transcription))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as a Gemini backend
    pub fn generation_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Base URL for configuring the mock as a Whisper backend
    pub fn transcription_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of image description requests received
    pub fn description_count(&self) -> u32 {
        self.state.description_count.load(Ordering::Relaxed)
    }

    /// Number of caption generation requests received
    pub fn generation_count(&self) -> u32 {
        self.state.generation_count.load(Ordering::Relaxed)
    }

    /// Number of transcription requests received
    pub fn transcription_count(&self) -> u32 {
        self.state.transcription_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockModel {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Answer `generateContent` calls
///
/// A request carrying inline data is an image description; a pure
/// text request is caption generation.
async fn handle_generate_content(State(state): State<Arc<MockModelState>>, Json(body): Json<Value>) -> Json<Value> {
    let has_inline_data = body["contents"][0]["parts"]
        .as_array()
        .is_some_and(|parts| parts.iter().any(|part| part.get("inline_data").is_some()));

    let text = if has_inline_data {
        state.description_count.fetch_add(1, Ordering::Relaxed);
        "A golden retriever running across a sunlit beach at golden hour.".to_string()
    } else {
        state.generation_count.fetch_add(1, Ordering::Relaxed);
        state.captions.clone()
    };

    Json(json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    }))
}

async fn handle_transcription(State(state): State<Arc<MockModelState>>) -> Json<Value> {
    state.transcription_count.fetch_add(1, Ordering::Relaxed);

    Json(json!({ "text": "Welcome back to the channel, today we review the new espresso machine." }))
}
