/// YouTube Transcript Analyzer - Rust Implementation
///
/// Reconstructs chapter-aware transcript documents from video subtitle
/// tracks and hands them to a summarization backend. Designed to replace
/// the Python implementation with significant performance improvements.

pub mod captions;
pub mod chapters;
pub mod config;
pub mod document;
pub mod error;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod processing;
pub mod summarizer;

// Re-export main types for easy access
pub use crate::captions::{Cue, CueDeduplicator, CueParser};
pub use crate::chapters::{Chapter, ChapterMapper, ChapterSection};
pub use crate::config::{Config, ConfigBuilder};
pub use crate::document::{Document, DocumentFormatter, FormatConfig, Paragraph};
pub use crate::error::TranscriptError;
pub use crate::fetch::{FetchError, VideoMeta, YtDlpFetcher};
pub use crate::output::TranscriptWriter;
pub use crate::pipeline::TranscriptPipeline;
pub use crate::processing::{BatchProcessor, ProcessingResult};
pub use crate::summarizer::TranscriptSummarizer;
