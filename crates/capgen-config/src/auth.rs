use secrecy::SecretString;
use serde::Deserialize;

/// Authentication and subscription service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Shared secret for signing session tokens
    pub jwt_secret: SecretString,

    /// Token lifetime in hours
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u64,

    /// Minimum accepted password length
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    /// Plan assigned to new signups
    #[serde(default = "default_plan")]
    pub default_plan: String,

    /// Argon2 cost parameters; omit for the crate defaults
    #[serde(default)]
    pub hashing: Option<HashingConfig>,

    /// Path prefixes that skip bearer authentication
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HashingConfig {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of iterations
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

fn default_token_ttl_hours() -> u64 {
    24
}

fn default_min_password_length() -> usize {
    8
}

fn default_plan() -> String {
    "Free".to_string()
}

fn default_public_paths() -> Vec<String> {
    vec![
        "/health".to_string(),
        "/signup".to_string(),
        "/login".to_string(),
        "/validate-token".to_string(),
        "/generate-captions".to_string(),
    ]
}
