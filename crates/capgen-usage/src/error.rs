use axum::{
    Json,
    response::{IntoResponse, Response},
};
use capgen_core::HttpError;
use capgen_store::StoreError;
use http::StatusCode;
use serde::Serialize;

pub type Result<T> = std::result::Result<T, UsageError>;

/// Usage accounting errors
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    /// The user has no active subscription to charge against
    #[error("no active subscription found")]
    NoActiveSubscription,

    /// Store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl HttpError for UsageError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NoActiveSubscription => StatusCode::NOT_FOUND,
            Self::Store(StoreError::Database(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &str {
        match self {
            Self::NoActiveSubscription => "not_found_error",
            Self::Store(_) => "dependency_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::NoActiveSubscription => self.to_string(),
            // Driver messages can carry connection details
            Self::Store(_) => "storage unavailable".to_string(),
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

impl IntoResponse for UsageError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "usage operation failed");
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
