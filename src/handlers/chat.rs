use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::Json,
};
use std::time::Instant;
use tracing::{error, info};

use super::{AppState, MAX_UPLOAD_BODY_BYTES};
use crate::error::{AppError, AppResult, ValidationError};
use crate::models::{ChatRequest, ChatResponse};

/// `POST /api/chat`: the raw body is the message; an empty body is a valid message.
pub async fn chat_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Json<ChatResponse>> {
    let start = Instant::now();

    let body = body.map_err(body_error)?;
    // Invalid sequences become U+FFFD, the same decoding as text uploads.
    let request = ChatRequest {
        text: String::from_utf8_lossy(&body).into_owned(),
    };

    info!(
        message_length = request.text.len(),
        provider = state.chat.provider_name(),
        "Starting chat request"
    );

    let reply = state.chat.chat(&request.text).await.map_err(|e| {
        error!(error = %e, "Chat provider call failed");
        e
    })?;

    info!(
        reply_length = reply.len(),
        total_time_ms = start.elapsed().as_millis() as u64,
        "Chat request completed successfully"
    );

    Ok(Json(ChatResponse::new(reply)))
}

fn body_error(rejection: BytesRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ValidationError::BodyTooLarge {
            limit: MAX_UPLOAD_BODY_BYTES,
        }
        .into();
    }
    AppError::invalid_request(format!("Failed to read chat body: {}", rejection.body_text()))
}
