pub(crate) mod gemini;
pub(crate) mod whisper;

use async_trait::async_trait;

use crate::error::Result;

/// Generative-language model used for image description and caption
/// text
#[async_trait]
pub(crate) trait GenerativeModel: Send + Sync {
    /// Describe an inline image, guided by `prompt`
    async fn describe_image(&self, prompt: &str, image: &[u8], content_type: &str) -> Result<String>;

    /// Generate free-form text from a prompt
    async fn generate_text(&self, prompt: &str) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;
}

/// Speech-to-text model used for video uploads
#[async_trait]
pub(crate) trait SpeechModel: Send + Sync {
    /// Transcribe the uploaded media
    async fn transcribe(&self, media: Vec<u8>, filename: String, content_type: String) -> Result<String>;

    /// Provider name for logging
    fn name(&self) -> &str;
}
