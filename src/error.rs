/// Error types for the transcript reconstruction pipeline.
///
/// Parse-level failures are fatal for a single video and carry enough
/// context for the caller to skip it and continue a batch. Malformed
/// individual cues are not represented here; they are logged and skipped
/// during parsing.

/// Result type for pipeline operations
pub type PipelineResult<T> = std::result::Result<T, TranscriptError>;

/// Errors produced by the transcript reconstruction pipeline
#[derive(thiserror::Error, Debug)]
pub enum TranscriptError {
    /// Input has no timestamp lines at all and is not a caption stream
    #[error("caption input has no recognizable timestamp lines")]
    UnrecognizedCaptions,

    /// A timestamp token could not be parsed
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// No cues survived deduplication
    #[error("transcript is empty after deduplication")]
    EmptyTranscript,
}
