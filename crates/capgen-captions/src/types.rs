use serde::Serialize;
use strum::{Display, EnumString};

/// Kind of uploaded media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// Caption voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    Formal,
    Casual,
    Professional,
    Friendly,
    Humorous,
}

/// Target caption length bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CaptionLength {
    Short,
    Medium,
    Long,
}

/// Parsed caption generation request
///
/// The upload lives in `media` as an owned buffer; dropping the
/// request on any exit path releases it, so there is no temp-file
/// cleanup to get wrong.
#[derive(Debug)]
pub struct CaptionRequest {
    pub media: Vec<u8>,
    pub filename: String,
    pub content_type: String,
    pub media_kind: MediaKind,
    pub tone: Tone,
    pub length: CaptionLength,
    pub hashtag_count: u8,
}

/// Generated caption text
#[derive(Debug, Serialize)]
pub struct CaptionResponse {
    pub captions: String,
}
