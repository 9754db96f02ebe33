use std::time::Duration;
use yt_transcript_analyzer::output::{render_document, TranscriptWriter};
use yt_transcript_analyzer::{
    Chapter, CueDeduplicator, CueParser, FormatConfig, TranscriptError, TranscriptPipeline,
    VideoMeta,
};

/// A rolling auto-caption stream the way yt-dlp emits it: header block,
/// inline word timing tags, and each cue repeating the previous cue's tail.
const ROLLING_VTT: &str = "\
WEBVTT
Kind: captions
Language: en

00:00:00.000 --> 00:00:03.200 align:start position:0%
welcome<00:00:00.900><c> back</c><00:00:01.300><c> to</c><00:00:01.600><c> the</c><00:00:02.000><c> channel</c>

00:00:03.200 --> 00:00:06.400 align:start position:0%
welcome back to the channel today we talk

00:00:06.400 --> 00:00:09.800 align:start position:0%
today we talk about college essays.

00:01:02.000 --> 00:01:05.500 align:start position:0%
the first step is brainstorming topics.

00:01:05.500 --> 00:01:09.000 align:start position:0%
brainstorming topics. then you write a draft!
";

fn chapters() -> Vec<Chapter> {
    vec![
        Chapter::new(Duration::from_secs(0), "Intro"),
        Chapter::new(Duration::from_secs(60), "Essay Strategy"),
    ]
}

#[test]
fn test_full_pipeline_with_chapters() {
    let pipeline = TranscriptPipeline::new();
    let document = pipeline.reconstruct(ROLLING_VTT, &chapters()).unwrap();

    assert_eq!(document.sections.len(), 2);
    assert_eq!(
        document.sections[0].heading.as_deref(),
        Some("[00:00:00] Intro")
    );
    assert_eq!(
        document.sections[1].heading.as_deref(),
        Some("[00:01:00] Essay Strategy")
    );

    // The rolling repetitions are gone but every word survives once
    let full_text: String = document
        .sections
        .iter()
        .flat_map(|s| s.paragraphs.iter())
        .map(|p| p.text.replace('\n', " "))
        .collect::<Vec<_>>()
        .join(" ");

    assert_eq!(full_text.matches("welcome back to the channel").count(), 1);
    assert_eq!(full_text.matches("today we talk").count(), 1);
    assert_eq!(full_text.matches("brainstorming topics.").count(), 1);
    assert!(full_text.contains("then you write a draft!"));
}

#[test]
fn test_pipeline_text_coverage_matches_dedup_output() {
    let pipeline = TranscriptPipeline::new();
    let document = pipeline.reconstruct(ROLLING_VTT, &chapters()).unwrap();

    // Reconstruct the expected word stream from the dedup stage alone
    let parser = CueParser::new();
    let deduped = CueDeduplicator::new().dedup(parser.parse(ROLLING_VTT).unwrap());
    let expected: Vec<String> = deduped
        .iter()
        .flat_map(|c| c.text.split_whitespace())
        .map(str::to_string)
        .collect();

    let actual: Vec<String> = document
        .sections
        .iter()
        .flat_map(|s| s.paragraphs.iter())
        .flat_map(|p| p.text.split_whitespace())
        .map(str::to_string)
        .collect();

    assert_eq!(actual, expected);
}

#[test]
fn test_pipeline_without_chapters_single_section() {
    let pipeline = TranscriptPipeline::new();
    let document = pipeline.reconstruct(ROLLING_VTT, &[]).unwrap();

    assert_eq!(document.sections.len(), 1);
    assert!(document.sections[0].heading.is_none());
}

#[test]
fn test_paragraph_timestamps_non_decreasing() {
    let config = FormatConfig {
        sentences_per_paragraph: 1,
        timestamp_interval: 1,
        ..FormatConfig::default()
    };
    let pipeline = TranscriptPipeline::with_config(config);
    let document = pipeline.reconstruct(ROLLING_VTT, &chapters()).unwrap();

    let stamps: Vec<Duration> = document
        .sections
        .iter()
        .flat_map(|s| s.paragraphs.iter())
        .filter_map(|p| p.leading_timestamp)
        .collect();

    assert!(!stamps.is_empty());
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_header_only_input_is_parse_error() {
    let pipeline = TranscriptPipeline::new();
    let result = pipeline.reconstruct("WEBVTT\nKind: captions\nLanguage: en\n", &[]);

    assert!(matches!(result, Err(TranscriptError::UnrecognizedCaptions)));
}

#[test]
fn test_fully_duplicated_captions_are_empty_transcript() {
    let raw = "\
WEBVTT

00:00:00.000 --> 00:00:02.000
<c></c>

00:00:02.000 --> 00:00:04.000
<00:00:03.000>
";
    let pipeline = TranscriptPipeline::new();

    assert!(matches!(
        pipeline.reconstruct(raw, &[]),
        Err(TranscriptError::EmptyTranscript)
    ));
}

#[tokio::test]
async fn test_document_written_to_dated_transcript_file() {
    let pipeline = TranscriptPipeline::new();
    let document = pipeline.reconstruct(ROLLING_VTT, &chapters()).unwrap();

    let temp_dir = tempfile::TempDir::new().unwrap();
    let writer = TranscriptWriter::new(temp_dir.path());
    let meta = VideoMeta {
        id: "abc123".to_string(),
        title: "College Essays: How?".to_string(),
        upload_date: Some("20240615".to_string()),
        timestamp: None,
        chapters: chapters(),
    };

    let path = writer.write_transcript(&meta, &document).await.unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "2024-06-15_College Essays_ How_.txt"
    );

    let written = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(written.contains("=== VIDEO CHAPTERS ==="));
    assert!(written.contains("## [00:01:00] Essay Strategy"));
    assert_eq!(written, render_document(&document));
}
