use std::sync::Arc;

use capgen_config::AuthConfig;
use capgen_store::{Store, StoreError, User};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{AuthError, Result},
    password,
    token::{SessionClaims, TokenIssuer},
};

/// User payload safe to return to clients
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
        }
    }
}

/// Token response for signup and login
#[derive(Debug, Serialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: PublicUser,
}

/// Credential and session operations over the store
pub struct AuthService {
    store: Arc<dyn Store>,
    tokens: TokenIssuer,
    hasher: password::Hasher,
    min_password_length: usize,
    default_plan: String,
}

impl AuthService {
    /// Build the service from configuration
    ///
    /// # Errors
    ///
    /// Returns an error when the configured argon2 parameters are
    /// rejected by the hasher
    pub fn new(config: &AuthConfig, store: Arc<dyn Store>) -> anyhow::Result<Self> {
        Ok(Self {
            store,
            tokens: TokenIssuer::new(&config.jwt_secret, config.token_ttl_hours),
            hasher: password::Hasher::new(config.hashing.as_ref())?,
            min_password_length: config.min_password_length,
            default_plan: config.default_plan.clone(),
        })
    }

    /// Register a new user and put them on the default plan
    ///
    /// Fails with `DuplicateEmail` when the address is taken and
    /// `MissingDefaultPlan` when the signup plan row does not exist.
    pub async fn signup(&self, email: &str, password: &str, full_name: &str) -> Result<TokenGrant> {
        validate_email(email)?;

        if password.chars().count() < self.min_password_length {
            return Err(AuthError::WeakPassword(self.min_password_length));
        }

        if full_name.trim().is_empty() {
            return Err(AuthError::EmptyName);
        }

        let password_hash = self.hasher.hash(password)?;

        let user = match self.store.create_user(email, &password_hash, full_name).await {
            Ok(user) => user,
            Err(StoreError::Conflict) => return Err(AuthError::DuplicateEmail),
            Err(e) => return Err(e.into()),
        };

        let plan = self
            .store
            .plan_by_name(&self.default_plan)
            .await?
            .ok_or(AuthError::MissingDefaultPlan)?;

        self.store.create_subscription(user.id, plan.id).await?;

        tracing::info!(user_id = %user.id, plan = %plan.name, "user signed up");

        self.grant(&user)
    }

    /// Authenticate and issue a session token
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenGrant> {
        let Some(user) = self.store.user_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !password::verify(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        self.grant(&user)
    }

    /// Verify a bearer token and return its claims
    pub fn verify_token(&self, token: &str) -> Result<SessionClaims> {
        self.tokens.verify(token)
    }

    /// Load the user a verified token points at
    pub async fn current_user(&self, user_id: Uuid) -> Result<User> {
        self.store.user_by_id(user_id).await?.ok_or(AuthError::UnknownUser)
    }

    fn grant(&self, user: &User) -> Result<TokenGrant> {
        let issued = self.tokens.issue(user.id, &user.email)?;

        Ok(TokenGrant {
            access_token: issued.access_token,
            token_type: "bearer",
            expires_in: issued.expires_in,
            user: PublicUser::from(user),
        })
    }
}

/// Minimal address-shape check; deliverability is not our problem
fn validate_email(email: &str) -> Result<()> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(AuthError::InvalidEmail);
    };

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || email.contains(char::is_whitespace) {
        return Err(AuthError::InvalidEmail);
    }

    Ok(())
}
