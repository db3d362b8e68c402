use chrono::Duration;
use jwt_compact::{
    AlgorithmExt, Claims, Header, TimeOptions, UntrustedToken,
    alg::{Hs256, Hs256Key},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthError;

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID
    #[serde(rename = "sub")]
    pub subject: Uuid,
    /// Email at issuance time
    pub email: String,
}

/// A freshly signed token
pub(crate) struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// HS256 session token issuer and verifier
///
/// Stateless: a token is a pure function of the claims, the shared
/// secret, and the clock.
pub struct TokenIssuer {
    key: Hs256Key,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &SecretString, ttl_hours: u64) -> Self {
        Self {
            key: Hs256Key::new(secret.expose_secret().as_bytes()),
            ttl: Duration::hours(i64::try_from(ttl_hours).unwrap_or(24)),
        }
    }

    /// Sign a token for the user, expiring after the configured TTL
    pub(crate) fn issue(&self, user_id: Uuid, email: &str) -> Result<IssuedToken, AuthError> {
        let claims = Claims::new(SessionClaims {
            subject: user_id,
            email: email.to_string(),
        })
        .set_duration_and_issuance(&TimeOptions::default(), self.ttl);

        let access_token = Hs256.token(&Header::empty(), &claims, &self.key).map_err(|e| {
            tracing::error!(error = %e, "token signing failed");
            AuthError::TokenCreation
        })?;

        Ok(IssuedToken {
            access_token,
            expires_in: self.ttl.num_seconds(),
        })
    }

    /// Verify signature and expiry, returning the decoded claims
    ///
    /// Fails with `InvalidToken` for anything malformed or signed with
    /// another key, `ExpiredToken` once past expiry.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let untrusted = UntrustedToken::new(token).map_err(|_| AuthError::InvalidToken)?;

        let token = Hs256
            .validator::<SessionClaims>(&self.key)
            .validate(&untrusted)
            .map_err(|_| AuthError::InvalidToken)?;

        token
            .claims()
            .validate_expiration(&TimeOptions::default())
            .map_err(|_| AuthError::ExpiredToken)?;

        Ok(token.claims().custom.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&SecretString::from("test-secret"), 24)
    }

    #[test]
    fn issue_then_verify_returns_the_same_identity() {
        let issuer = issuer();
        let user_id = Uuid::new_v4();

        let issued = issuer.issue(user_id, "user@example.com").unwrap();
        assert_eq!(issued.expires_in, 24 * 3600);

        let claims = issuer.verify(&issued.access_token).unwrap();
        assert_eq!(claims.subject, user_id);
        assert_eq!(claims.email, "user@example.com");
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let expired = TokenIssuer {
            key: Hs256Key::new(b"test-secret"),
            ttl: Duration::seconds(-60),
        };

        let issued = expired.issue(Uuid::new_v4(), "user@example.com").unwrap();

        let err = issuer().verify(&issued.access_token).unwrap_err();
        assert!(matches!(err, AuthError::ExpiredToken));
    }

    #[test]
    fn tampered_token_is_rejected_as_invalid() {
        let issuer = issuer();
        let issued = issuer.issue(Uuid::new_v4(), "user@example.com").unwrap();

        let mut tampered = issued.access_token;
        // Flip a character in the signature segment
        let flipped = if tampered.ends_with('A') { 'B' } else { 'A' };
        tampered.pop();
        tampered.push(flipped);

        let err = issuer.verify(&tampered).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let other = TokenIssuer::new(&SecretString::from("other-secret"), 24);
        let issued = other.issue(Uuid::new_v4(), "user@example.com").unwrap();

        let err = issuer().verify(&issued.access_token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn garbage_is_rejected_as_invalid() {
        let err = issuer().verify("not-a-jwt").unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }
}
