use secrecy::SecretString;
use serde::Deserialize;

/// Caption generation configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaptionsConfig {
    /// Generative model used for image description and caption text
    pub generation: GenerationConfig,

    /// Speech-to-text model used for video uploads; when absent, video
    /// requests are rejected as unconfigured
    #[serde(default)]
    pub transcription: Option<TranscriptionConfig>,
}

/// Generative-language provider configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Provider implementation
    #[serde(default)]
    pub provider_type: GenerationProviderType,

    /// Provider API key
    pub api_key: SecretString,

    /// Model identifier
    #[serde(default = "default_generation_model")]
    pub model: String,

    /// Base URL override, mainly for tests
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Speech-to-text provider configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranscriptionConfig {
    /// Provider implementation
    #[serde(default)]
    pub provider_type: TranscriptionProviderType,

    /// Provider API key
    pub api_key: SecretString,

    /// Model identifier
    #[serde(default = "default_transcription_model")]
    pub model: String,

    /// Base URL override, mainly for tests
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProviderType {
    #[default]
    Gemini,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProviderType {
    #[default]
    Whisper,
}

fn default_generation_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}
