use argon2::{
    Algorithm, Argon2, Params, PasswordHasher, PasswordVerifier, Version,
    password_hash::{PasswordHash, SaltString, rand_core::OsRng},
};
use capgen_config::HashingConfig;

use crate::error::AuthError;

/// Argon2id password hasher with configurable cost
pub(crate) struct Hasher {
    argon2: Argon2<'static>,
}

impl Hasher {
    /// Build a hasher, using the crate-default cost when no override
    /// is configured
    pub fn new(config: Option<&HashingConfig>) -> anyhow::Result<Self> {
        let argon2 = match config {
            Some(cfg) => {
                let params = Params::new(cfg.memory_kib, cfg.iterations, cfg.parallelism, None)
                    .map_err(|e| anyhow::anyhow!("invalid argon2 parameters: {e}"))?;
                Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
            }
            None => Argon2::default(),
        };

        Ok(Self { argon2 })
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!(error = %e, "password hashing failed");
                AuthError::Hashing
            })?;

        Ok(hash.to_string())
    }
}

/// Check a password against a stored PHC hash string
///
/// Cost parameters come from the hash itself, so verification works
/// across cost changes. The comparison inside argon2 is constant-time.
pub(crate) fn verify(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash).is_ok_and(|parsed| {
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
}
