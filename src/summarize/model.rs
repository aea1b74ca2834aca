use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::{DigestError, Result};

/// OpenAI-compatible chat completion providers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Openai,
    Grok,
    Gemini,
}

pub struct ProviderConfig {
    pub api_url: &'static str,
    pub model: &'static str,
    pub env_var: &'static str,
}

impl Provider {
    pub fn config(&self) -> ProviderConfig {
        match self {
            Provider::Openai => ProviderConfig {
                api_url: "https://api.openai.com/v1/chat/completions",
                model: "gpt-4o-mini",
                env_var: "OPENAI_API_KEY",
            },
            Provider::Grok => ProviderConfig {
                api_url: "https://api.x.ai/v1/chat/completions",
                model: "grok-4-fast",
                env_var: "XAI_API_KEY",
            },
            Provider::Gemini => ProviderConfig {
                api_url: "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions",
                model: "gemini-2.5-flash",
                env_var: "GEMINI_API_KEY",
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Provider::Openai => "OpenAI",
            Provider::Grok => "Grok",
            Provider::Gemini => "Gemini",
        }
    }

    /// Read the API key for this provider from the environment
    pub fn api_key(&self) -> Result<String> {
        let env_var = self.config().env_var;
        std::env::var(env_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| DigestError::MissingApiKey {
                env_var: env_var.to_string(),
            })
    }
}

/// Text-in, text-out language model
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send a prompt and return the model's full response text
    async fn prompt(&self, prompt: &str) -> Result<String>;
}

/// Language model reached over a `/chat/completions` endpoint
pub struct ChatCompletionsModel {
    client: Client,
    api_url: String,
    model: String,
    api_key: String,
    temperature: Option<f32>,
}

impl ChatCompletionsModel {
    pub fn new(api_url: &str, model: &str, api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            model: model.to_string(),
            api_key,
            temperature: None,
        })
    }

    /// Build the configured backend; `model_override` replaces the configured model name
    pub fn from_config(config: &Config, model_override: Option<&str>) -> anyhow::Result<Self> {
        let api_key = config.model.provider.api_key()?;
        let model = model_override.unwrap_or_else(|| config.model_name());

        let mut backend = Self::new(
            config.api_url(),
            model,
            api_key,
            Duration::from_secs(config.model.timeout_secs),
        )?;
        backend.temperature = config.model.temperature;

        Ok(backend)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt,
                },
            ],
        });

        if let Some(temperature) = self.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }

        body
    }
}

#[async_trait]
impl LanguageModel for ChatCompletionsModel {
    async fn prompt(&self, prompt: &str) -> Result<String> {
        let failed = |reason: String| DigestError::ModelFailed { reason };

        tracing::debug!("Sending {} byte prompt to {} ({})", prompt.len(), self.api_url, self.model);

        let response = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| failed(format!("HTTP {}: unreadable response: {}", status, e)))?;

        if !status.is_success() {
            let message = body["error"]["message"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| body.to_string());
            return Err(failed(format!("HTTP {}: {}", status, message)));
        }

        // Extract content from response
        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| failed(format!("Invalid API response: {}", body)))
    }
}
