/// Downstream summarization
///
/// The reconstructed document plus the chapter list feed an LLM backend
/// that produces a structured summary. This is a collaborator of the
/// pipeline, not part of it: transcript production never depends on
/// summarization succeeding.

pub mod providers;
pub mod summary;

// Re-export main types
pub use summary::TranscriptSummarizer;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Summarization backend types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SummaryProvider {
    OpenAI,
    LMStudio,
}

/// Summarizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Generate summaries after writing transcripts
    pub enabled: bool,
    /// Backend to use
    pub provider: SummaryProvider,
    /// API endpoint (for LMStudio and custom deployments)
    pub endpoint: Option<String>,
    /// API key (for cloud providers)
    pub api_key: Option<String>,
    /// Model to use
    pub model: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: SummaryProvider::OpenAI,
            endpoint: None,
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1500,
            temperature: 0.3,
            timeout_seconds: 120,
        }
    }
}

/// Chat message for backend communication
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Backend response
#[derive(Debug, Clone)]
pub struct SummaryResponse {
    pub content: String,
    pub tokens_used: Option<u32>,
}

/// Trait for chat-completion backends
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat(&self, messages: Vec<ChatMessage>) -> Result<SummaryResponse>;
    async fn is_available(&self) -> bool;
    fn provider_type(&self) -> SummaryProvider;
}

/// Create a backend instance based on configuration
pub fn create_backend(config: &SummarizerConfig) -> Result<Box<dyn ChatBackend>> {
    match config.provider {
        SummaryProvider::OpenAI => Ok(Box::new(providers::OpenAIProvider::new(config.clone())?)),
        SummaryProvider::LMStudio => {
            Ok(Box::new(providers::LMStudioProvider::new(config.clone())?))
        }
    }
}
