use secrecy::SecretString;
use serde::Deserialize;

/// Relational store configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Storage backend to use
    #[serde(default)]
    pub backend: StorageBackend,

    /// Postgres connection URL (required for the postgres backend)
    pub url: Option<SecretString>,

    /// Maximum pool size
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a connection from the pool
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_seconds: u64,
}

/// Which store implementation backs the service
///
/// `memory` keeps everything in-process and is for development and
/// tests only; durable deployments use `postgres`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    5
}
