use crate::error::ValidationError;
use crate::models::{UploadedFile, PDF_MIME_TYPE, TEXT_MIME_TYPE};

/// 10 MiB, inclusive.
pub const MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;

pub const SUPPORTED_MEDIA_TYPES: [&str; 2] = [PDF_MIME_TYPE, TEXT_MIME_TYPE];

/// Upload policy for the summarize endpoint.
///
/// Checks run in a fixed order (emptiness, size, media type) and the first
/// failure is returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileValidator;

impl FileValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, file: Option<&UploadedFile>) -> Result<(), ValidationError> {
        let file = match file {
            Some(file) if file.size > 0 && !file.bytes.is_empty() => file,
            _ => return Err(ValidationError::Empty),
        };

        if file.size > MAX_FILE_SIZE_BYTES {
            return Err(ValidationError::TooLarge {
                size: file.size,
                limit: MAX_FILE_SIZE_BYTES,
            });
        }

        match file.media_type_essence() {
            Some(essence) if SUPPORTED_MEDIA_TYPES.contains(&essence.as_str()) => Ok(()),
            other => Err(ValidationError::UnsupportedType {
                media_type: other.unwrap_or_else(|| "none".to_string()),
            }),
        }
    }
}
