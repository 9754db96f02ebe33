/// Transcript and summary persistence
///
/// Serializes the in-memory document to the plain-text transcript layout
/// and writes it under a date-prefixed filename. The pipeline itself never
/// touches the filesystem; everything here happens after a document has
/// been fully produced.
use crate::captions::format_offset;
use crate::document::Document;
use crate::fetch::VideoMeta;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::info;

/// Maximum length of the title part of a filename
const MAX_TITLE_CHARS: usize = 80;

/// Render a document to the heading-plus-paragraph plain-text layout
pub fn render_document(document: &Document) -> String {
    let mut out = String::new();
    let has_chapters = document.sections.iter().any(|s| s.heading.is_some());

    if has_chapters {
        out.push_str("=== VIDEO CHAPTERS ===\n");
        for (i, section) in document.sections.iter().enumerate() {
            if let Some(heading) = &section.heading {
                out.push_str(&format!("{}. {}\n", i + 1, heading));
            }
        }
        out.push('\n');
        out.push_str("=== TRANSCRIPT BY CHAPTERS ===\n");
    } else {
        out.push_str("=== TRANSCRIPT WITH TIMESTAMPS ===\n");
    }

    for section in &document.sections {
        if let Some(heading) = &section.heading {
            out.push('\n');
            out.push_str(&format!("## {}\n", heading));
        }
        for paragraph in &section.paragraphs {
            out.push('\n');
            if let Some(stamp) = paragraph.leading_timestamp {
                out.push_str(&format!("[{}]\n", format_offset(stamp)));
            }
            out.push_str(&paragraph.text);
            out.push('\n');
        }
    }

    out
}

/// Replace filesystem-hostile characters and cap the title length
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            other => other,
        })
        .take(MAX_TITLE_CHARS)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalize an upstream publish date to YYYY-MM-DD.
///
/// Upstream dates arrive as YYYYMMDD, ISO-8601, or unix seconds depending
/// on the extractor path; anything unparseable becomes "unknown-date".
pub fn format_publish_date(upload_date: Option<&str>, timestamp: Option<i64>) -> String {
    if let Some(raw) = upload_date {
        let raw = raw.trim();

        if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y%m%d") {
                return date.format("%Y-%m-%d").to_string();
            }
        }

        // ISO-8601 like 2024-06-15T10:30:00Z, or a bare YYYY-MM-DD prefix
        let date_part = raw.split('T').next().unwrap_or(raw);
        if NaiveDate::parse_from_str(date_part, "%Y-%m-%d").is_ok() {
            return date_part.to_string();
        }
    }

    if let Some(seconds) = timestamp {
        if let Some(moment) = DateTime::from_timestamp(seconds, 0) {
            return moment.format("%Y-%m-%d").to_string();
        }
    }

    "unknown-date".to_string()
}

/// Writes transcripts and summaries under an output directory
#[derive(Debug, Clone)]
pub struct TranscriptWriter {
    transcripts_dir: PathBuf,
    summaries_dir: PathBuf,
}

impl TranscriptWriter {
    /// Create a writer rooted at the given output directory
    pub fn new(output_dir: &Path) -> Self {
        Self {
            transcripts_dir: output_dir.join("transcripts"),
            summaries_dir: output_dir.join("summaries"),
        }
    }

    /// Path the transcript for this video would be written to
    pub fn transcript_path(&self, meta: &VideoMeta) -> PathBuf {
        self.transcripts_dir.join(format!("{}.txt", file_stem(meta)))
    }

    /// Path the summary for this video would be written to
    pub fn summary_path(&self, meta: &VideoMeta) -> PathBuf {
        self.summaries_dir
            .join(format!("{}_summary.txt", file_stem(meta)))
    }

    /// Render and persist a document, returning the written path
    pub async fn write_transcript(&self, meta: &VideoMeta, document: &Document) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.transcripts_dir)
            .await
            .with_context(|| format!("creating {}", self.transcripts_dir.display()))?;

        let path = self.transcript_path(meta);
        tokio::fs::write(&path, render_document(document))
            .await
            .with_context(|| format!("writing {}", path.display()))?;

        info!("💾 Transcript saved: {}", path.display());
        Ok(path)
    }

    /// Persist a generated summary, returning the written path
    pub async fn write_summary(&self, meta: &VideoMeta, summary: &str) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.summaries_dir)
            .await
            .with_context(|| format!("creating {}", self.summaries_dir.display()))?;

        let date = format_publish_date(meta.upload_date.as_deref(), meta.timestamp);
        let content = format!(
            "# {}\n**Date:** {}\n\n---\n\n{}\n",
            meta.title, date, summary
        );

        let path = self.summary_path(meta);
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("writing {}", path.display()))?;

        info!("💾 Summary saved: {}", path.display());
        Ok(path)
    }
}

/// Date-prefixed, sanitized file stem shared by transcript and summary
fn file_stem(meta: &VideoMeta) -> String {
    format!(
        "{}_{}",
        format_publish_date(meta.upload_date.as_deref(), meta.timestamp),
        sanitize_title(&meta.title)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentSection, Paragraph};
    use std::time::Duration;

    fn meta(title: &str, upload_date: Option<&str>) -> VideoMeta {
        VideoMeta {
            id: "vid1".to_string(),
            title: title.to_string(),
            upload_date: upload_date.map(str::to_string),
            timestamp: None,
            chapters: Vec::new(),
        }
    }

    fn chaptered_document() -> Document {
        Document {
            sections: vec![DocumentSection {
                heading: Some("[00:00:00] Intro".to_string()),
                paragraphs: vec![Paragraph {
                    leading_timestamp: Some(Duration::from_secs(1)),
                    text: "Welcome to the show.".to_string(),
                }],
            }],
        }
    }

    #[test]
    fn test_render_with_chapters() {
        let text = render_document(&chaptered_document());

        assert!(text.contains("=== VIDEO CHAPTERS ==="));
        assert!(text.contains("1. [00:00:00] Intro"));
        assert!(text.contains("=== TRANSCRIPT BY CHAPTERS ==="));
        assert!(text.contains("## [00:00:00] Intro"));
        assert!(text.contains("[00:00:01]"));
        assert!(text.contains("Welcome to the show."));
    }

    #[test]
    fn test_render_without_chapters() {
        let document = Document {
            sections: vec![DocumentSection {
                heading: None,
                paragraphs: vec![Paragraph {
                    leading_timestamp: None,
                    text: "Plain text.".to_string(),
                }],
            }],
        };
        let text = render_document(&document);

        assert!(text.contains("=== TRANSCRIPT WITH TIMESTAMPS ==="));
        assert!(!text.contains("=== VIDEO CHAPTERS ==="));
        assert!(text.contains("Plain text."));
    }

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("What? A/B <test>"), "What_ A_B _test_");

        let long = "x".repeat(200);
        assert_eq!(sanitize_title(&long).len(), 80);
    }

    #[test]
    fn test_format_publish_date_variants() {
        assert_eq!(format_publish_date(Some("20240615"), None), "2024-06-15");
        assert_eq!(
            format_publish_date(Some("2024-06-15T10:30:00Z"), None),
            "2024-06-15"
        );
        assert_eq!(format_publish_date(None, Some(1_718_409_600)), "2024-06-15");
        assert_eq!(format_publish_date(Some("junk"), None), "unknown-date");
        assert_eq!(format_publish_date(None, None), "unknown-date");
    }

    #[test]
    fn test_transcript_filename_is_date_prefixed() {
        let writer = TranscriptWriter::new(Path::new("/tmp/out"));
        let path = writer.transcript_path(&meta("My Video: Part 1", Some("20240615")));

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "2024-06-15_My Video_ Part 1.txt"
        );
    }

    #[tokio::test]
    async fn test_write_transcript_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let writer = TranscriptWriter::new(dir.path());

        let path = writer
            .write_transcript(&meta("A Title", Some("20240615")), &chaptered_document())
            .await
            .unwrap();

        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(written.contains("Welcome to the show."));
    }
}
