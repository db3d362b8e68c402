use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    error::{CaptionError, Result},
    http_client::http_client,
};

use super::SpeechModel;

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// `OpenAI` Whisper speech-to-text provider
pub(crate) struct WhisperProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
}

impl WhisperProvider {
    pub fn new(api_key: SecretString, model: String, base_url: Option<String>) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_string()),
            api_key,
            model,
        }
    }
}

#[derive(serde::Deserialize)]
struct WhisperResponse {
    text: String,
}

#[async_trait]
impl SpeechModel for WhisperProvider {
    async fn transcribe(&self, media: Vec<u8>, filename: String, content_type: String) -> Result<String> {
        let url = format!("{}/audio/transcriptions", self.base_url.trim_end_matches('/'));

        tracing::debug!(model = %self.model, bytes = media.len(), "Whisper transcription request");

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(media)
                    .file_name(filename)
                    .mime_str(&content_type)
                    .map_err(|e| CaptionError::InvalidRequest(format!("invalid content type: {e}")))?,
            )
            .text("model", self.model.clone());

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Whisper request failed");
                CaptionError::Connection(format!("failed to reach Whisper: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "unknown error".to_string());
            tracing::error!(%status, %message, "Whisper API error");

            return Err(CaptionError::ProviderApi {
                status: status.as_u16(),
                message,
            });
        }

        let result: WhisperResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse Whisper response");
            CaptionError::EmptyResponse
        })?;

        Ok(result.text)
    }

    fn name(&self) -> &str {
        "whisper"
    }
}
