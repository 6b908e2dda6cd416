use std::sync::Arc;

use crate::error::ProviderError;
use crate::services::llm::LlmClient;

pub const SUMMARIZE_INSTRUCTION: &str =
    "Summarize the following content in a concise manner, highlighting the key points and main ideas.";

/// Sends extracted document text to the LLM behind [`SUMMARIZE_INSTRUCTION`].
#[derive(Clone)]
pub struct SummarizationService {
    client: Arc<dyn LlmClient>,
}

impl SummarizationService {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub async fn summarize(&self, text: &str) -> Result<String, ProviderError> {
        self.client.complete(Some(SUMMARIZE_INSTRUCTION), text).await
    }
}
