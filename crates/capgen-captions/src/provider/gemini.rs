use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    error::{CaptionError, Result},
    http_client::http_client,
};

use super::GenerativeModel;

const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini provider
///
/// Serves both generative roles: image description (inline base64
/// data) and caption text generation.
pub(crate) struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: SecretString, model: String, base_url: Option<String>) -> Self {
        Self {
            client: http_client(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string()),
            api_key,
            model,
        }
    }

    async fn invoke(&self, parts: Vec<Part>) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content { parts }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.expose_secret())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Gemini request failed");
                CaptionError::Connection(format!("failed to reach Gemini: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| "unknown error".to_string());
            tracing::error!(%status, %message, "Gemini API error");

            return Err(CaptionError::ProviderApi {
                status: status.as_u16(),
                message,
            });
        }

        let result: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse Gemini response");
            CaptionError::EmptyResponse
        })?;

        let text = result
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(CaptionError::EmptyResponse);
        }

        Ok(text)
    }
}

/// Wire format for the Gemini `generateContent` request
#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inline_data", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Wire format for the Gemini `generateContent` response
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[async_trait]
impl GenerativeModel for GeminiProvider {
    async fn describe_image(&self, prompt: &str, image: &[u8], content_type: &str) -> Result<String> {
        tracing::debug!(model = %self.model, bytes = image.len(), "Gemini image description request");

        self.invoke(vec![
            Part {
                text: Some(prompt.to_string()),
                inline_data: None,
            },
            Part {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: content_type.to_string(),
                    data: BASE64.encode(image),
                }),
            },
        ])
        .await
    }

    async fn generate_text(&self, prompt: &str) -> Result<String> {
        tracing::debug!(model = %self.model, "Gemini text generation request");

        self.invoke(vec![Part {
            text: Some(prompt.to_string()),
            inline_data: None,
        }])
        .await
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
