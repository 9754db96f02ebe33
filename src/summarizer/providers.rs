/// Chat-completion backend implementations
///
/// Both backends speak the OpenAI chat-completions wire format; they differ
/// in endpoint defaults and authentication.
use super::{ChatBackend, ChatMessage, SummarizerConfig, SummaryProvider, SummaryResponse};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

/// OpenAI provider implementation
pub struct OpenAIProvider {
    config: SummarizerConfig,
    client: reqwest::Client,
}

impl OpenAIProvider {
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl ChatBackend for OpenAIProvider {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<SummaryResponse> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| anyhow!("OpenAI API key not configured"))?;
        let endpoint = self
            .config
            .endpoint
            .as_deref()
            .unwrap_or(OPENAI_ENDPOINT);

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Sending request to OpenAI model {}", self.config.model);

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("OpenAI API error {}: {}", status, text));
        }

        let chat_response: ChatResponse = response.json().await?;
        into_summary_response(chat_response, "OpenAI")
    }

    async fn is_available(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn provider_type(&self) -> SummaryProvider {
        SummaryProvider::OpenAI
    }
}

/// LMStudio provider implementation
pub struct LMStudioProvider {
    config: SummarizerConfig,
    client: reqwest::Client,
}

impl LMStudioProvider {
    pub fn new(config: SummarizerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl ChatBackend for LMStudioProvider {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<SummaryResponse> {
        let endpoint = self
            .config
            .endpoint
            .as_ref()
            .ok_or_else(|| anyhow!("LMStudio endpoint not configured"))?;

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Sending request to LMStudio at {}", endpoint);

        let response = self.client.post(endpoint).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("LMStudio API error {}: {}", status, text));
        }

        let chat_response: ChatResponse = response.json().await?;
        into_summary_response(chat_response, "LMStudio")
    }

    async fn is_available(&self) -> bool {
        let endpoint = match &self.config.endpoint {
            Some(ep) => ep,
            None => return false,
        };

        let health_endpoint = endpoint.replace("/v1/chat/completions", "/health");
        match self.client.get(&health_endpoint).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn provider_type(&self) -> SummaryProvider {
        SummaryProvider::LMStudio
    }
}

fn into_summary_response(response: ChatResponse, provider: &str) -> Result<SummaryResponse> {
    let content = response
        .choices
        .first()
        .ok_or_else(|| anyhow!("No response from {}", provider))?
        .message
        .content
        .trim()
        .to_string();

    Ok(SummaryResponse {
        content,
        tokens_used: response.usage.map(|u| u.total_tokens),
    })
}
