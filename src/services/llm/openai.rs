use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{ensure_success, http_client, LlmClient};
use crate::config::ProviderSettings;
use crate::error::ProviderError;

const PROVIDER: &str = "openai";
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// OpenAI Chat Completions adapter (also works against compatible servers).
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenAiClient {
    pub fn new(settings: ProviderSettings, timeout: Duration) -> Result<Self, ProviderError> {
        let url = format!(
            "{}{}",
            settings.base_url.trim_end_matches('/'),
            CHAT_COMPLETIONS_PATH
        );
        Ok(Self {
            client: http_client(PROVIDER, timeout)?,
            api_key: settings.api_key,
            model: settings.model,
            url,
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(
        &self,
        system_instruction: Option<&str>,
        user_text: &str,
    ) -> Result<String, ProviderError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(instruction) = system_instruction {
            messages.push(Message {
                role: "system",
                content: instruction,
            });
        }
        messages.push(Message {
            role: "user",
            content: user_text,
        });

        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Request {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        let body: ChatCompletionResponse = ensure_success(PROVIDER, response)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse {
                provider: PROVIDER,
                message: format!("failed to decode response: {e}"),
            })?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::InvalidResponse {
                provider: PROVIDER,
                message: "response contained no message content".into(),
            })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
