use axum::extract::{FromRequest, Multipart, Request};
use axum::response::IntoResponse;

use crate::{
    error::CaptionError,
    types::{CaptionLength, CaptionRequest, MediaKind, Tone},
};

/// Extractor for the caption generation multipart form
///
/// Field names and defaults match the original public API: `file`
/// (required), `fileType` (image), `tone` (casual), `length` (medium),
/// `hashtagCount` (5).
pub(crate) struct ExtractCaptionRequest(pub CaptionRequest);

impl<S> FromRequest<S> for ExtractCaptionRequest
where
    S: Send + Sync,
{
    type Rejection = axum::response::Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| CaptionError::InvalidRequest(format!("expected multipart form: {e}")).into_response())?;

        let mut media: Option<Vec<u8>> = None;
        let mut filename = String::from("upload");
        let mut content_type = String::from("application/octet-stream");
        let mut media_kind = MediaKind::Image;
        let mut tone = Tone::Casual;
        let mut length = CaptionLength::Medium;
        let mut hashtag_count: u8 = 5;

        while let Ok(Some(field)) = multipart.next_field().await {
            let field_name = field.name().unwrap_or("").to_string();

            match field_name.as_str() {
                "file" => {
                    if let Some(name) = field.file_name() {
                        filename = name.to_string();
                    }
                    if let Some(ct) = field.content_type() {
                        content_type = ct.to_string();
                    }
                    let bytes = field.bytes().await.map_err(|e| {
                        CaptionError::InvalidRequest(format!("failed to read file data: {e}")).into_response()
                    })?;
                    media = Some(bytes.to_vec());
                }
                "fileType" => {
                    media_kind = parse_field(field, "fileType").await?;
                }
                "tone" => {
                    tone = parse_field(field, "tone").await?;
                }
                "length" => {
                    length = parse_field(field, "length").await?;
                }
                "hashtagCount" => {
                    hashtag_count = parse_field(field, "hashtagCount").await?;
                }
                _ => {
                    // Skip unknown fields
                }
            }
        }

        let media = media.ok_or_else(|| CaptionError::MissingFile.into_response())?;

        Ok(Self(CaptionRequest {
            media,
            filename,
            content_type,
            media_kind,
            tone,
            length,
            hashtag_count,
        }))
    }
}

/// Read a text field and parse it, rejecting unknown values with 400
async fn parse_field<T>(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<T, axum::response::Response>
where
    T: std::str::FromStr,
{
    let raw = field
        .text()
        .await
        .map_err(|e| CaptionError::InvalidRequest(format!("failed to read {name} field: {e}")).into_response())?;

    raw.parse()
        .map_err(|_| CaptionError::InvalidRequest(format!("invalid {name} value: {raw}")).into_response())
}
