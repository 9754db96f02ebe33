use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::document::FormatConfig;
use crate::fetch::FetchConfig;
use crate::summarizer::{SummarizerConfig, SummaryProvider};

/// Configuration for the transcript analyzer
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Caption and metadata fetching settings
    pub fetch: FetchConfig,

    /// Document formatting settings
    pub format: FormatConfig,

    /// Summarization settings
    pub summarizer: SummarizerConfig,

    /// Output and storage settings
    pub output: OutputConfig,

    /// Performance and resource settings
    pub performance: PerformanceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Base output directory; transcripts/ and summaries/ live under it
    pub base_dir: PathBuf,

    /// Skip videos whose transcript file already exists
    pub skip_existing: bool,

    /// Save a processing_results.json next to the transcripts
    pub save_results: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("./output"),
            skip_existing: true,
            save_results: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Maximum number of concurrent videos in flight
    pub max_workers: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            max_workers: num_cpus::get().min(8),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to environment overrides
    pub fn load() -> Result<Self> {
        let config_paths = [
            "transcript-analyzer.toml",
            "config/transcript-analyzer.toml",
            "~/.config/transcript-analyzer/config.toml",
        ];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str::<Config>(&config_str) {
                    Ok(config) => {
                        tracing::info!("📄 Loaded configuration from: {}", path);
                        return Ok(config.with_env_overrides());
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        Ok(Self::default().with_env_overrides())
    }

    /// Apply environment-variable overrides on top of this configuration
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(workers) = std::env::var("TRANSCRIPT_ANALYZER_WORKERS") {
            if let Ok(workers) = workers.parse() {
                self.performance.max_workers = workers;
            }
        }

        if let Ok(output_dir) = std::env::var("TRANSCRIPT_ANALYZER_OUTPUT_DIR") {
            self.output.base_dir = PathBuf::from(output_dir);
        }

        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            self.summarizer.api_key = Some(api_key);
        }

        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            self.summarizer.model = model;
        }

        self
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path, config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path);
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.performance.max_workers == 0 {
            return Err(anyhow!("max_workers must be greater than 0"));
        }

        if self.format.wrap_width == 0 {
            return Err(anyhow!("wrap_width must be greater than 0"));
        }
        if self.format.sentences_per_paragraph == 0 {
            return Err(anyhow!("sentences_per_paragraph must be greater than 0"));
        }
        if self.format.max_paragraph_chars < self.format.wrap_width {
            return Err(anyhow!("max_paragraph_chars must be at least wrap_width"));
        }

        if self.summarizer.enabled
            && self.summarizer.provider == SummaryProvider::OpenAI
            && self.summarizer.api_key.is_none()
        {
            return Err(anyhow!("API key required for the OpenAI summarizer"));
        }
        if self.summarizer.enabled
            && self.summarizer.provider == SummaryProvider::LMStudio
            && self.summarizer.endpoint.is_none()
        {
            return Err(anyhow!("endpoint required for the LMStudio summarizer"));
        }

        Ok(())
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.config.performance.max_workers = workers;
        self
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.config.output.base_dir = dir;
        self
    }

    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.config.format.wrap_width = width;
        self
    }

    pub fn with_subtitle_lang(mut self, lang: impl Into<String>) -> Self {
        self.config.fetch.subtitle_lang = lang.into();
        self
    }

    pub fn enable_summarization(mut self, enable: bool) -> Self {
        self.config.summarizer.enabled = enable;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
