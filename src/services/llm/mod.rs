//! Backend-agnostic text completion.
//!
//! Services depend on [`LlmClient`] only; the concrete adapter (Gemini or
//! OpenAI) is picked once at startup by [`build_llm_client`].

pub mod gemini;
pub mod openai;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{Config, LlmProvider};
use crate::error::ProviderError;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// One round-trip: an optional priming instruction, then the user turn.
    async fn complete(
        &self,
        system_instruction: Option<&str>,
        user_text: &str,
    ) -> Result<String, ProviderError>;

    fn provider_name(&self) -> &'static str;
}

pub fn build_llm_client(config: &Config) -> Result<Arc<dyn LlmClient>, ProviderError> {
    let timeout = Duration::from_secs(config.llm_request_timeout_seconds);
    let settings = config.provider_settings.clone();

    let client: Arc<dyn LlmClient> = match config.provider {
        LlmProvider::Gemini => Arc::new(GeminiClient::new(settings, timeout)?),
        LlmProvider::OpenAi => Arc::new(OpenAiClient::new(settings, timeout)?),
    };

    tracing::info!(provider = client.provider_name(), "LLM client initialised");
    Ok(client)
}

pub(crate) fn http_client(
    provider: &'static str,
    timeout: Duration,
) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .user_agent(concat!("parley/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::Configuration {
            provider,
            message: e.to_string(),
        })
}

/// Maps a non-2xx vendor response to [`ProviderError::Status`].
pub(crate) async fn ensure_success(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(provider, status = %status, "LLM provider returned an error status");
    Err(ProviderError::Status {
        provider,
        status: status.as_u16(),
        body,
    })
}
