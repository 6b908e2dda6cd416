pub mod chat;
pub mod health;
pub mod summarize;

pub use chat::*;
pub use health::*;
pub use summarize::*;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use once_cell::sync::Lazy;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::logging_middleware;
use crate::services::{
    ChatService, ContentExtractor, FileValidator, LlmClient, SummarizationService,
    MAX_FILE_SIZE_BYTES,
};

/// Request body cap: the upload limit plus room for multipart framing, so
/// oversize files are still reported by the validator.
pub const MAX_UPLOAD_BODY_BYTES: usize = MAX_FILE_SIZE_BYTES + 1024 * 1024;

/// Everything a handler needs; all fields share one LLM client.
#[derive(Clone)]
pub struct AppState {
    pub chat: ChatService,
    pub summarization: SummarizationService,
    pub validator: FileValidator,
    pub extractor: ContentExtractor,
}

impl AppState {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            chat: ChatService::new(client.clone()),
            summarization: SummarizationService::new(client),
            validator: FileValidator::new(),
            extractor: ContentExtractor::new(),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Lazy::force(&STARTED_AT);

    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/summarize", post(summarize_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(axum::middleware::from_fn(logging_middleware))
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY_BYTES)),
        )
}
