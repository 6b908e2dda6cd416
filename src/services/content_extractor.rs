use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use lopdf::Document;

use crate::error::ExtractionError;
use crate::models::UploadedFile;

/// Turns an already-validated upload into plain text.
///
/// PDFs are parsed in memory with `lopdf` first so encrypted documents can be
/// refused before any text stripping happens. Everything else is decoded as
/// UTF-8, replacing invalid sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentExtractor;

impl ContentExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, file: &UploadedFile) -> Result<String, ExtractionError> {
        if file.is_pdf() {
            self.extract_pdf(&file.bytes)
        } else {
            Ok(decode_text(&file.bytes))
        }
    }

    /// Runs [`extract`](Self::extract) on the blocking pool; the upload is dropped when it finishes.
    pub async fn extract_owned(&self, file: UploadedFile) -> Result<String, ExtractionError> {
        let extractor = *self;
        tokio::task::spawn_blocking(move || extractor.extract(&file)).await?
    }

    fn extract_pdf(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let start = Instant::now();

        let document = Document::load_mem(bytes).map_err(|e| {
            tracing::debug!("PDF structure could not be parsed: {}", e);
            ExtractionError::malformed(e.to_string())
        })?;

        if is_encrypted(&document) {
            tracing::warn!("Rejecting encrypted PDF");
            return Err(ExtractionError::EncryptedPdf);
        }

        let pages = document.get_pages().len();
        drop(document);

        // pdf-extract can panic on some malformed content streams.
        let text = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
            .map_err(|_| ExtractionError::malformed("PDF content could not be decoded"))?
            .map_err(|e| ExtractionError::malformed(format!("{:?}", e)))?;

        if text.trim().is_empty() {
            tracing::warn!(pages, "PDF has no extractable text layer");
        }

        tracing::debug!(
            pages,
            text_length = text.len(),
            processing_time_ms = start.elapsed().as_millis() as u64,
            "PDF text extraction completed"
        );

        Ok(text)
    }
}

fn is_encrypted(document: &Document) -> bool {
    document.trailer.get(b"Encrypt").is_ok()
}

fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
