pub mod chat_service;
pub mod content_extractor;
pub mod file_validator;
pub mod llm;
pub mod summarization_service;

pub use chat_service::ChatService;
pub use content_extractor::ContentExtractor;
pub use file_validator::{FileValidator, MAX_FILE_SIZE_BYTES};
pub use llm::{build_llm_client, LlmClient};
pub use summarization_service::{SummarizationService, SUMMARIZE_INSTRUCTION};
