use axum::{
    Json,
    response::{IntoResponse, Response},
};
use capgen_core::HttpError;
use capgen_store::StoreError;
use http::StatusCode;
use serde::Serialize;

pub(crate) type Result<T> = std::result::Result<T, AuthError>;

/// Authentication and account errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Malformed email address
    #[error("invalid email address")]
    InvalidEmail,

    /// Password below the configured minimum length
    #[error("password must be at least {0} characters")]
    WeakPassword(usize),

    /// Empty display name
    #[error("full name must not be empty")]
    EmptyName,

    /// Unknown email or wrong password — deliberately the same error
    /// for both, so responses cannot be used to enumerate accounts
    #[error("invalid email or password")]
    InvalidCredentials,

    /// No bearer token on a protected route
    #[error("missing bearer token")]
    MissingToken,

    /// Token past its expiry
    #[error("token has expired")]
    ExpiredToken,

    /// Bad signature or malformed token
    #[error("invalid token")]
    InvalidToken,

    /// The token subject no longer resolves to a user
    #[error("user not found")]
    UnknownUser,

    /// Email already registered
    #[error("email already registered")]
    DuplicateEmail,

    /// The configured signup plan has no row in the store
    #[error("default plan is not configured")]
    MissingDefaultPlan,

    /// Password hashing failed
    #[error("password hashing failed")]
    Hashing,

    /// Token signing failed
    #[error("token creation failed")]
    TokenCreation,

    /// Store failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl HttpError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidEmail | Self::WeakPassword(_) | Self::EmptyName => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::MissingToken | Self::ExpiredToken | Self::InvalidToken => {
                StatusCode::UNAUTHORIZED
            }
            Self::UnknownUser => StatusCode::NOT_FOUND,
            Self::DuplicateEmail => StatusCode::CONFLICT,
            Self::Store(StoreError::Database(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::MissingDefaultPlan | Self::Hashing | Self::TokenCreation | Self::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn kind(&self) -> &str {
        match self {
            Self::InvalidEmail | Self::WeakPassword(_) | Self::EmptyName => "validation_error",
            Self::InvalidCredentials | Self::MissingToken | Self::ExpiredToken | Self::InvalidToken => "auth_error",
            Self::UnknownUser => "not_found_error",
            Self::DuplicateEmail => "conflict_error",
            Self::MissingDefaultPlan => "configuration_error",
            Self::Hashing | Self::TokenCreation => "internal_error",
            Self::Store(_) => "dependency_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            // Driver messages can carry connection details
            Self::Store(_) => "storage unavailable".to_string(),
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

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "auth operation failed");
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
