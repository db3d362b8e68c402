//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use capgen_config::{
    AuthConfig, CaptionsConfig, Config, DatabaseConfig, GenerationConfig, GenerationProviderType, HealthConfig,
    ServerConfig, StorageBackend, TranscriptionConfig, TranscriptionProviderType,
};
use secrecy::SecretString;

/// Builder for constructing test configurations
///
/// Starts from a memory-backed store so tests need no external
/// database.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                    cors: None,
                },
                database: Some(DatabaseConfig {
                    backend: StorageBackend::Memory,
                    url: None,
                    max_connections: 5,
                    acquire_timeout_seconds: 5,
                }),
                auth: None,
                captions: None,
            },
        }
    }

    /// Enable the auth service with test defaults
    pub fn with_auth(mut self) -> Self {
        self.config.auth = Some(AuthConfig {
            jwt_secret: SecretString::from("integration-test-secret"),
            token_ttl_hours: 24,
            min_password_length: 8,
            default_plan: "Free".to_string(),
            hashing: None,
            public_paths: vec![
                "/health".to_string(),
                "/signup".to_string(),
                "/login".to_string(),
                "/validate-token".to_string(),
                "/generate-captions".to_string(),
            ],
        });
        self
    }

    /// Point caption generation at a mock model backend
    pub fn with_captions(mut self, base_url: &str) -> Self {
        self.config.captions = Some(CaptionsConfig {
            generation: GenerationConfig {
                provider_type: GenerationProviderType::Gemini,
                api_key: SecretString::from("test-key"),
                model: "gemini-2.0-flash".to_string(),
                base_url: Some(base_url.to_string()),
            },
            transcription: None,
        });
        self
    }

    /// Point transcription at a mock model backend
    ///
    /// Requires `with_captions` to have been called first.
    pub fn with_transcription(mut self, base_url: &str) -> Self {
        let captions = self.config.captions.as_mut().expect("call with_captions first");
        captions.transcription = Some(TranscriptionConfig {
            provider_type: TranscriptionProviderType::Whisper,
            api_key: SecretString::from("test-key"),
            model: "whisper-1".to_string(),
            base_url: Some(base_url.to_string()),
        });
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Drop the database section (caption-only deployment)
    pub fn without_database(mut self) -> Self {
        self.config.database = None;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
