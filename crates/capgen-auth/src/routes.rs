use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::State,
    routing::{get, post},
};
use capgen_core::CurrentUser;
use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{AuthError, Result},
    service::{AuthService, PublicUser, TokenGrant},
};

/// Create the endpoint router for the auth service
///
/// `/me` sits behind the bearer-auth middleware; the other three are
/// public by design (the token for `/validate-token` travels in the
/// body).
pub fn endpoint_router() -> Router<Arc<AuthService>> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/validate-token", post(validate_token))
        .route("/me", get(me))
}

#[derive(Deserialize)]
struct SignupRequest {
    email: String,
    password: String,
    full_name: String,
}

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct ValidateTokenRequest {
    token: String,
}

#[derive(Serialize)]
struct ValidateTokenResponse {
    valid: bool,
    user: PublicUser,
}

#[derive(Serialize)]
struct UserResponse {
    id: Uuid,
    email: String,
    full_name: String,
    created_at: DateTime<Utc>,
}

async fn signup(
    State(service): State<Arc<AuthService>>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<TokenGrant>)> {
    let grant = service.signup(&request.email, &request.password, &request.full_name).await?;

    Ok((StatusCode::CREATED, Json(grant)))
}

async fn login(State(service): State<Arc<AuthService>>, Json(request): Json<LoginRequest>) -> Result<Json<TokenGrant>> {
    let grant = service.login(&request.email, &request.password).await?;

    Ok(Json(grant))
}

/// Service-to-service token check
///
/// An unknown subject reads as an invalid token here, not a 404 — the
/// caller only learns whether the credential is usable.
async fn validate_token(
    State(service): State<Arc<AuthService>>,
    Json(request): Json<ValidateTokenRequest>,
) -> Result<Json<ValidateTokenResponse>> {
    let claims = service.verify_token(&request.token)?;

    let user = service.current_user(claims.subject).await.map_err(|e| match e {
        AuthError::UnknownUser => AuthError::InvalidToken,
        other => other,
    })?;

    Ok(Json(ValidateTokenResponse {
        valid: true,
        user: PublicUser::from(&user),
    }))
}

async fn me(
    State(service): State<Arc<AuthService>>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<UserResponse>> {
    let user = service.current_user(current.id).await?;

    Ok(Json(UserResponse {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
        created_at: user.created_at,
    }))
}
