use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use capgen_auth::{AuthError, AuthService};
use capgen_core::CurrentUser;

/// Authenticate requests via bearer token
///
/// Skips configured public path prefixes. For everything else the
/// token is verified and the decoded identity is inserted as a request
/// extension for handlers to read.
pub async fn bearer_auth_middleware(
    service: Arc<AuthService>,
    public_paths: Vec<String>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if public_paths.iter().any(|p| path.starts_with(p)) {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let Some(token) = token else {
        return AuthError::MissingToken.into_response();
    };

    match service.verify_token(token) {
        Ok(claims) => {
            let mut request = request;
            request.extensions_mut().insert(CurrentUser {
                id: claims.subject,
                email: claims.email,
            });
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(error = %e, %path, "bearer authentication failed");
            e.into_response()
        }
    }
}
