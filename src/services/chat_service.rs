use std::sync::Arc;

use crate::error::ProviderError;
use crate::services::llm::LlmClient;

/// Forwards a raw chat message as the user turn, with no priming instruction.
#[derive(Clone)]
pub struct ChatService {
    client: Arc<dyn LlmClient>,
}

impl ChatService {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub async fn chat(&self, message: &str) -> Result<String, ProviderError> {
        self.client.complete(None, message).await
    }

    pub fn provider_name(&self) -> &'static str {
        self.client.provider_name()
    }
}
