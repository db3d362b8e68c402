use std::time::Duration;

use serde::Deserialize;

/// CORS configuration
///
/// The original deployment fronts a browser SPA, so origins and
/// credentials are the fields that actually vary between environments.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins; empty list means allow any origin
    #[serde(default)]
    pub origins: Vec<String>,
    /// Allow credentialed requests
    #[serde(default)]
    pub credentials: bool,
    /// Max age for preflight cache in seconds
    #[serde(default)]
    pub max_age: Option<u64>,
}

impl CorsConfig {
    /// Get max age as Duration
    pub fn max_age_duration(&self) -> Option<Duration> {
        self.max_age.map(Duration::from_secs)
    }
}
