use std::path::Path;

use secrecy::ExposeSecret;

use crate::{Config, StorageBackend};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if no subsystem is enabled or a subsystem is
    /// missing a dependency it needs at runtime
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_has_subsystems()?;
        self.validate_auth_config()?;
        self.validate_database_config()?;
        Ok(())
    }

    /// Ensure the server has something to serve
    fn validate_has_subsystems(&self) -> anyhow::Result<()> {
        if self.auth.is_none() && self.captions.is_none() {
            anyhow::bail!("at least one subsystem must be configured ([auth] or [captions])");
        }

        Ok(())
    }

    /// The auth service needs a secret and a place to keep its rows
    fn validate_auth_config(&self) -> anyhow::Result<()> {
        let Some(ref auth) = self.auth else {
            return Ok(());
        };

        if auth.jwt_secret.expose_secret().is_empty() {
            anyhow::bail!("auth.jwt_secret must not be empty");
        }

        if auth.token_ttl_hours == 0 {
            anyhow::bail!("auth.token_ttl_hours must be greater than 0");
        }

        if self.database.is_none() {
            anyhow::bail!("[auth] requires a [database] section");
        }

        Ok(())
    }

    /// The postgres backend cannot start without a connection URL
    fn validate_database_config(&self) -> anyhow::Result<()> {
        let Some(ref database) = self.database else {
            return Ok(());
        };

        if database.backend == StorageBackend::Postgres && database.url.is_none() {
            anyhow::bail!("database.url is required for the postgres backend");
        }

        Ok(())
    }
}
