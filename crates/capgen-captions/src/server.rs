use capgen_config::{CaptionsConfig, GenerationProviderType, TranscriptionProviderType};

use crate::{
    error::{CaptionError, Result},
    prompt,
    provider::{GenerativeModel, SpeechModel, gemini::GeminiProvider, whisper::WhisperProvider},
    types::{CaptionRequest, CaptionResponse, MediaKind},
};

/// Caption server holding the injected provider handles
///
/// Providers are constructed once at startup and read-only afterwards;
/// nothing here is initialized as an import-time side effect.
pub struct Server {
    generator: Box<dyn GenerativeModel>,
    transcriber: Option<Box<dyn SpeechModel>>,
}

impl Server {
    /// Run the two-stage caption flow: describe the media, then
    /// generate styled captions from the description
    pub(crate) async fn generate(&self, request: CaptionRequest) -> Result<CaptionResponse> {
        let content_description = match request.media_kind {
            MediaKind::Video => {
                let transcriber = self
                    .transcriber
                    .as_ref()
                    .ok_or(CaptionError::TranscriptionUnavailable)?;

                let transcription = transcriber
                    .transcribe(request.media, request.filename, request.content_type)
                    .await?;

                format!("Video Content Analysis:\nTranscription: {transcription}")
            }
            MediaKind::Image => {
                let description = self
                    .generator
                    .describe_image(prompt::DESCRIBE_IMAGE, &request.media, &request.content_type)
                    .await?;

                format!("Image Content Analysis:\n{description}")
            }
        };

        let caption_prompt =
            prompt::caption_prompt(&content_description, request.tone, request.length, request.hashtag_count);

        let captions = self.generator.generate_text(&caption_prompt).await?;

        tracing::debug!(generator = %self.generator.name(), "caption generation complete");

        Ok(CaptionResponse { captions })
    }
}

/// Builder for constructing the caption server from configuration
pub struct CaptionServerBuilder<'a> {
    config: &'a CaptionsConfig,
}

impl<'a> CaptionServerBuilder<'a> {
    pub fn new(config: &'a CaptionsConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> Result<Server> {
        let generation = &self.config.generation;
        let generator: Box<dyn GenerativeModel> = match generation.provider_type {
            GenerationProviderType::Gemini => Box::new(GeminiProvider::new(
                generation.api_key.clone(),
                generation.model.clone(),
                generation.base_url.clone(),
            )),
        };

        let transcriber: Option<Box<dyn SpeechModel>> = self.config.transcription.as_ref().map(|transcription| {
            let provider: Box<dyn SpeechModel> = match transcription.provider_type {
                TranscriptionProviderType::Whisper => Box::new(WhisperProvider::new(
                    transcription.api_key.clone(),
                    transcription.model.clone(),
                    transcription.base_url.clone(),
                )),
            };
            provider
        });

        if transcriber.is_none() {
            tracing::debug!("no transcription provider configured; video uploads will be rejected");
        }

        tracing::debug!(generator = %self.config.generation.model, "caption server initialized");

        Ok(Server { generator, transcriber })
    }
}
