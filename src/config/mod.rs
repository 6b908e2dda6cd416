use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::{info, warn};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Gemini,
    OpenAi,
}

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini",
            LlmProvider::OpenAi => "openai",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(LlmProvider::Gemini),
            "openai" => Ok(LlmProvider::OpenAi),
            other => Err(anyhow::anyhow!(
                "Unsupported LLM_PROVIDER '{}'. Supported providers: gemini, openai",
                other
            )),
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection settings for whichever backend was selected.
#[derive(Clone)]
pub struct ProviderSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub provider: LlmProvider,
    pub provider_settings: ProviderSettings,
    pub llm_request_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let provider: LlmProvider = env::var("LLM_PROVIDER")
            .unwrap_or_else(|_| {
                info!("LLM_PROVIDER not set, using default: gemini");
                "gemini".to_string()
            })
            .parse()?;

        let config = Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| {
                info!("SERVER_HOST not set, using default: 0.0.0.0");
                "0.0.0.0".to_string()
            }),
            server_port: Self::server_port()?,
            provider,
            provider_settings: Self::provider_settings(provider)?,
            llm_request_timeout_seconds: Self::parse_env_var("LLM_REQUEST_TIMEOUT_SECONDS", 60)
                .context("Failed to parse LLM_REQUEST_TIMEOUT_SECONDS")?,
        };

        config.validate()?;

        info!(
            provider = %config.provider,
            model = %config.provider_settings.model,
            "Configuration loaded successfully"
        );
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    // PORT takes precedence for hosting platforms that inject it.
    fn server_port() -> Result<u16> {
        if let Ok(port) = env::var("PORT") {
            match port.parse::<u16>() {
                Ok(parsed) => return Ok(parsed),
                Err(e) => warn!("Failed to parse PORT: {} (falling back to SERVER_PORT)", e),
            }
        }
        Self::parse_env_var("SERVER_PORT", 8080).context("Failed to parse SERVER_PORT")
    }

    fn provider_settings(provider: LlmProvider) -> Result<ProviderSettings> {
        let (key_var, model_var, url_var, default_model, default_url) = match provider {
            LlmProvider::Gemini => (
                "GEMINI_API_KEY",
                "GEMINI_MODEL",
                "GEMINI_BASE_URL",
                DEFAULT_GEMINI_MODEL,
                DEFAULT_GEMINI_BASE_URL,
            ),
            LlmProvider::OpenAi => (
                "OPENAI_API_KEY",
                "OPENAI_MODEL",
                "OPENAI_BASE_URL",
                DEFAULT_OPENAI_MODEL,
                DEFAULT_OPENAI_BASE_URL,
            ),
        };

        let api_key = env::var(key_var)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!("{} must be set when LLM_PROVIDER={}", key_var, provider)
            })?;

        Ok(ProviderSettings {
            api_key,
            model: Self::string_env_var(model_var, default_model),
            base_url: Self::string_env_var(url_var, default_url),
        })
    }

    fn string_env_var(var_name: &str, default: &str) -> String {
        match env::var(var_name) {
            Ok(val) if !val.trim().is_empty() => val.trim().to_string(),
            _ => {
                info!("{} not set, using default: {}", var_name, default);
                default.to_string()
            }
        }
    }

    fn parse_env_var<T>(var_name: &str, default: T) -> Result<T>
    where
        T: FromStr + Copy + fmt::Debug,
        T::Err: fmt::Display,
    {
        match env::var(var_name) {
            Ok(val) => match val.parse() {
                Ok(parsed) => Ok(parsed),
                Err(e) => {
                    warn!("Failed to parse {}: {} (using default: {:?})", var_name, e, default);
                    Ok(default)
                }
            },
            Err(_) => {
                info!("{} not set, using default: {:?}", var_name, default);
                Ok(default)
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT must be greater than 0"));
        }
        if self.llm_request_timeout_seconds == 0 {
            return Err(anyhow::anyhow!(
                "LLM_REQUEST_TIMEOUT_SECONDS must be greater than 0"
            ));
        }
        if !self.provider_settings.base_url.starts_with("http://")
            && !self.provider_settings.base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "{} base URL must start with http:// or https://",
                self.provider
            ));
        }
        Ok(())
    }
}
