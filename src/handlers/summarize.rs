use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::Json,
};
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::{AppState, MAX_UPLOAD_BODY_BYTES};
use crate::error::{AppError, AppResult, ValidationError};
use crate::models::{SummaryRequest, SummaryResponse, UploadedFile};

pub const FILE_FIELD: &str = "file";

pub async fn summarize_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<SummaryResponse>> {
    let start = Instant::now();

    let mut multipart = multipart.map_err(|rejection| {
        warn!(rejection = %rejection.body_text(), "Summarize request is not a multipart upload");
        AppError::invalid_request(rejection.body_text())
    })?;

    let file = extract_file_from_multipart(&mut multipart).await?;

    state.validator.validate(file.as_ref())?;
    let file = file.ok_or(ValidationError::Empty)?;

    info!(
        file_name = %file.filename,
        file_size = file.size,
        media_type = file.declared_media_type.as_deref().unwrap_or("none"),
        "Upload validated"
    );

    let text = state.extractor.extract_owned(file).await.map_err(|e| {
        warn!(error = %e, "Content extraction failed");
        e
    })?;
    let request = SummaryRequest { text };

    info!(text_length = request.text.len(), "Content extracted, requesting summary");

    let provider_start = Instant::now();
    let summary = state
        .summarization
        .summarize(&request.text)
        .await
        .map_err(|e| {
            error!(error = %e, "Summarization provider call failed");
            e
        })?;

    info!(
        summary_length = summary.len(),
        provider_time_ms = provider_start.elapsed().as_millis() as u64,
        total_time_ms = start.elapsed().as_millis() as u64,
        "Summarize request completed successfully"
    );

    Ok(Json(SummaryResponse::new(summary)))
}

/// Returns the `file` part, or `None` when the form has no such field.
async fn extract_file_from_multipart(multipart: &mut Multipart) -> AppResult<Option<UploadedFile>> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_error)?;

        let mut file = UploadedFile::new(file_name, data);
        if let Some(media_type) = content_type {
            file = file.with_media_type(media_type);
        }

        debug!(
            "Received upload: {} ({} bytes, type: {:?})",
            file.filename, file.size, file.declared_media_type
        );
        return Ok(Some(file));
    }

    Ok(None)
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        // The body limit tripped before the whole file arrived.
        return ValidationError::BodyTooLarge {
            limit: MAX_UPLOAD_BODY_BYTES,
        }
        .into();
    }
    AppError::invalid_request(format!("Failed to read multipart body: {}", err.body_text()))
}
