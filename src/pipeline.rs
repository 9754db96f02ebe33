/// Transcript reconstruction pipeline
///
/// Chains the four pure stages: parse the raw caption stream, strip rolling
/// overlap, reconcile cues against the chapter list, and format the final
/// document. No stage performs network or disk I/O; each run is independent
/// and callers may process different videos in parallel freely.
use crate::captions::{CueDeduplicator, CueParser};
use crate::chapters::{Chapter, ChapterMapper};
use crate::document::{Document, DocumentFormatter, FormatConfig};
use crate::error::{PipelineResult, TranscriptError};
use tracing::debug;

/// The full caption-to-document transformation
pub struct TranscriptPipeline {
    parser: CueParser,
    deduplicator: CueDeduplicator,
    mapper: ChapterMapper,
    formatter: DocumentFormatter,
}

impl TranscriptPipeline {
    /// Create a pipeline with default formatting settings
    pub fn new() -> Self {
        Self::with_config(FormatConfig::default())
    }

    /// Create a pipeline with custom formatting settings
    pub fn with_config(config: FormatConfig) -> Self {
        Self {
            parser: CueParser::new(),
            deduplicator: CueDeduplicator::new(),
            mapper: ChapterMapper::new(),
            formatter: DocumentFormatter::with_config(config),
        }
    }

    /// Reconstruct a chapter-aware document from raw caption text.
    ///
    /// Either a complete, internally consistent document is produced or an
    /// error is returned; no partial output exists. The chapter list may be
    /// empty, which yields a single headingless section.
    pub fn reconstruct(
        &self,
        raw_captions: &str,
        chapters: &[Chapter],
    ) -> PipelineResult<Document> {
        let cues = self.parser.parse(raw_captions)?;
        debug!("Parsed {} cues", cues.len());

        let cues = self.deduplicator.dedup(cues);
        debug!("{} cues after deduplication", cues.len());
        if cues.is_empty() {
            return Err(TranscriptError::EmptyTranscript);
        }

        let sections = self.mapper.map(cues, chapters);
        Ok(self.formatter.format(sections))
    }
}

impl Default for TranscriptPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_reconstruct_with_chapters() {
        let raw = "WEBVTT\n\n00:00:01.000 --> 00:00:03.000\nWelcome to the channel.\n\n00:01:05.000 --> 00:01:07.000\nNow the main part.\n";
        let chapters = vec![
            Chapter::new(Duration::from_secs(0), "Intro"),
            Chapter::new(Duration::from_secs(60), "Main"),
        ];

        let doc = TranscriptPipeline::new().reconstruct(raw, &chapters).unwrap();

        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].heading.as_deref(), Some("[00:00:00] Intro"));
        assert_eq!(doc.sections[1].heading.as_deref(), Some("[00:01:00] Main"));
    }

    #[test]
    fn test_reconstruct_without_chapters() {
        let raw = "WEBVTT\n\n00:00:01.000 --> 00:00:03.000\nJust some text.\n";
        let doc = TranscriptPipeline::new().reconstruct(raw, &[]).unwrap();

        assert_eq!(doc.sections.len(), 1);
        assert!(doc.sections[0].heading.is_none());
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_header_only_input_fails() {
        let raw = "WEBVTT\nKind: captions\n";
        let result = TranscriptPipeline::new().reconstruct(raw, &[]);

        assert!(matches!(result, Err(TranscriptError::UnrecognizedCaptions)));
    }

    #[test]
    fn test_tag_only_cues_yield_empty_transcript() {
        let raw = "WEBVTT\n\n00:00:01.000 --> 00:00:03.000\n<c></c>\n\n00:00:03.000 --> 00:00:05.000\n<00:00:04.000>\n";
        let result = TranscriptPipeline::new().reconstruct(raw, &[]);

        assert!(matches!(result, Err(TranscriptError::EmptyTranscript)));
    }
}
