use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use capgen_core::HttpError;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CaptionError>;

/// Caption generation errors
#[derive(Debug, Error)]
pub enum CaptionError {
    /// Multipart form had no `file` field
    #[error("no file uploaded")]
    MissingFile,

    /// Malformed form field
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A video arrived but no transcription provider is configured
    #[error("video transcription is not configured")]
    TranscriptionUnavailable,

    /// Upstream model API returned an error
    #[error("model API error ({status}): {message}")]
    ProviderApi {
        status: u16,
        message: String,
    },

    /// Network failure reaching the upstream model
    #[error("connection error: {0}")]
    Connection(String),

    /// Upstream response had no usable text
    #[error("model returned an empty response")]
    EmptyResponse,
}

impl HttpError for CaptionError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFile | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::TranscriptionUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ProviderApi { .. } | Self::Connection(_) | Self::EmptyResponse => StatusCode::BAD_GATEWAY,
        }
    }

    fn kind(&self) -> &str {
        match self {
            Self::MissingFile | Self::InvalidRequest(_) => "validation_error",
            Self::TranscriptionUnavailable => "configuration_error",
            Self::ProviderApi { .. } | Self::Connection(_) | Self::EmptyResponse => "dependency_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            // Upstream bodies can echo prompts or keys; keep them in
            // the logs only
            Self::ProviderApi { status, .. } => format!("model API error (status {status})"),
            _ => self.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetails,
}

#[derive(Serialize)]
struct ErrorDetails {
    message: String,
    r#type: String,
    code: u16,
}

impl IntoResponse for CaptionError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "caption generation failed");
        }

        let body = ErrorBody {
            error: ErrorDetails {
                message: self.client_message(),
                r#type: self.kind().to_string(),
                code: status.as_u16(),
            },
        };

        (status, Json(body)).into_response()
    }
}
