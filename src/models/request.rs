use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const TEXT_MIME_TYPE: &str = "text/plain";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SummaryRequest {
    pub text: String,
}

/// A single multipart upload, held only for the lifetime of one request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub size: usize,
    pub bytes: Bytes,
    pub declared_media_type: Option<String>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self {
            filename: filename.into(),
            size: bytes.len(),
            bytes,
            declared_media_type: None,
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.declared_media_type = Some(media_type.into());
        self
    }

    /// Declared type without parameters, lowercased (`Text/Plain; charset=utf-8` -> `text/plain`).
    pub fn media_type_essence(&self) -> Option<String> {
        self.declared_media_type.as_deref().map(|mt| {
            mt.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type_essence().as_deref() == Some(PDF_MIME_TYPE)
    }
}
