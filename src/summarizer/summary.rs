/// Transcript summarization orchestrator
///
/// Builds a chapter-aware prompt from the rendered document and asks the
/// configured backend for a structured summary.
use super::{create_backend, ChatBackend, ChatMessage, SummarizerConfig};
use crate::captions::format_offset;
use crate::chapters::Chapter;
use anyhow::{anyhow, Result};
use tracing::{debug, info};

const SYSTEM_PROMPT: &str = "You are a helpful assistant that creates clear, structured summaries of educational video transcripts.";

/// Summarizes reconstructed transcripts through an LLM backend
pub struct TranscriptSummarizer {
    backend: Box<dyn ChatBackend>,
}

impl TranscriptSummarizer {
    /// Create a new summarizer, verifying the backend is reachable
    pub async fn new(config: SummarizerConfig) -> Result<Self> {
        let backend = create_backend(&config)?;

        if !backend.is_available().await {
            return Err(anyhow!(
                "Summarization backend {:?} is not available",
                config.provider
            ));
        }

        info!("✅ Summarizer initialized with {:?} backend", config.provider);

        Ok(Self { backend })
    }

    /// Produce a structured summary of one transcript
    pub async fn summarize(
        &self,
        transcript_text: &str,
        chapters: &[Chapter],
    ) -> Result<String> {
        debug!(
            "Summarizing transcript ({} chars, {} chapters)",
            transcript_text.len(),
            chapters.len()
        );

        let messages = vec![
            ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: build_prompt(transcript_text, chapters),
            },
        ];

        let response = self.backend.chat(messages).await?;
        debug!("Summary completed (tokens: {:?})", response.tokens_used);

        Ok(response.content)
    }
}

/// Build the chapter-aware summarization prompt
fn build_prompt(transcript_text: &str, chapters: &[Chapter]) -> String {
    let chapter_instruction = if chapters.is_empty() {
        String::new()
    } else {
        let listing = chapters
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}. {} ({})", i + 1, c.title, format_offset(c.start)))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "This video has publisher-declared chapters. Organize your analysis \
             to follow this chapter structure and reference chapters by name:\n\n\
             CHAPTERS:\n{}\n\n",
            listing
        )
    };

    format!(
        "Please provide a comprehensive summary of the following video transcript.\n\n\
         {}Format your response as follows:\n\n\
         # VIDEO SUMMARY\n\n\
         ## Overview\n\
         [3-4 sentence overview of what the video covers]\n\n\
         ## Chapter Breakdown\n\
         [Per-chapter analysis if chapters exist, otherwise state that the video has no defined chapters]\n\n\
         ## Main Topics Covered\n\
         [List of major topics and themes with brief explanations]\n\n\
         ## Key Takeaways\n\
         [The most important lessons and insights, with specifics]\n\n\
         ## Actionable Recommendations\n\
         [Concrete action items mentioned in the video]\n\n\
         ---\n\n\
         Transcript:\n{}",
        chapter_instruction, transcript_text
    )
}
