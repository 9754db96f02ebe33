/// Document formatting
///
/// Regroups per-chapter cue text into wrapped paragraphs with periodic
/// timestamp markers and chapter headings. The single-section (no chapter)
/// and multi-section paths share all of the formatting code; only the
/// heading differs.
use super::{Document, DocumentSection, Paragraph};
use crate::captions::{format_offset, Cue};
use crate::chapters::ChapterSection;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for paragraph segmentation and timestamp markers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Target line-wrap width in characters, never breaking mid-word
    pub wrap_width: usize,
    /// Close a paragraph after this many sentence endings
    pub sentences_per_paragraph: usize,
    /// Hard character cap per paragraph, for punctuation-free ASR text
    pub max_paragraph_chars: usize,
    /// Show a timestamp marker on the first paragraph of each section and
    /// every Nth paragraph after it
    pub timestamp_interval: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            wrap_width: 100,
            sentences_per_paragraph: 4,
            max_paragraph_chars: 1200,
            timestamp_interval: 3,
        }
    }
}

/// Formats chapter sections into the final document
pub struct DocumentFormatter {
    config: FormatConfig,
}

impl DocumentFormatter {
    /// Create a formatter with default settings
    pub fn new() -> Self {
        Self::with_config(FormatConfig::default())
    }

    /// Create a formatter with custom settings
    pub fn with_config(config: FormatConfig) -> Self {
        Self { config }
    }

    /// Produce a document from ordered chapter sections.
    ///
    /// Every input cue's text appears exactly once, in original relative
    /// order; nothing is summarized or fabricated here.
    pub fn format(&self, sections: Vec<ChapterSection>) -> Document {
        let sections = sections
            .into_iter()
            .map(|section| {
                let heading = section
                    .chapter
                    .as_ref()
                    .map(|c| format!("[{}] {}", format_offset(c.start), c.title));

                DocumentSection {
                    heading,
                    paragraphs: self.build_paragraphs(&section.cues),
                }
            })
            .collect();

        Document { sections }
    }

    /// Segment one section's cues into paragraphs
    fn build_paragraphs(&self, cues: &[Cue]) -> Vec<Paragraph> {
        let mut paragraphs: Vec<(Duration, String)> = Vec::new();

        let mut buffer = String::new();
        let mut first_start: Option<Duration> = None;
        let mut sentences = 0;

        for cue in cues {
            if buffer.is_empty() {
                first_start = Some(cue.start);
            } else {
                buffer.push(' ');
            }
            buffer.push_str(&cue.text);
            sentences += count_sentence_endings(&cue.text);

            // Paragraphs close at cue boundaries so the leading timestamp
            // always belongs to the first contributing cue
            if sentences >= self.config.sentences_per_paragraph
                || buffer.len() >= self.config.max_paragraph_chars
            {
                if let Some(start) = first_start.take() {
                    paragraphs.push((start, std::mem::take(&mut buffer)));
                }
                sentences = 0;
            }
        }
        if let Some(start) = first_start.take() {
            if !buffer.is_empty() {
                paragraphs.push((start, buffer));
            }
        }

        paragraphs
            .into_iter()
            .enumerate()
            .map(|(i, (start, text))| Paragraph {
                leading_timestamp: (i % self.config.timestamp_interval.max(1) == 0)
                    .then_some(start),
                text: wrap_text(&text, self.config.wrap_width),
            })
            .collect()
    }
}

impl Default for DocumentFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of sentence endings: terminal punctuation followed by whitespace
/// or the end of the fragment
fn count_sentence_endings(text: &str) -> usize {
    let mut count = 0;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            match chars.peek() {
                None => count += 1,
                Some(next) if next.is_whitespace() => count += 1,
                _ => {}
            }
        }
    }
    count
}

/// Wrap text at the nearest whitespace at or before the width boundary,
/// never mid-word
fn wrap_text(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapters::Chapter;

    fn cue(start: u64, text: &str) -> Cue {
        Cue::new(
            Duration::from_secs(start),
            Duration::from_secs(start + 2),
            text,
        )
    }

    fn section(chapter: Option<Chapter>, cues: Vec<Cue>) -> ChapterSection {
        ChapterSection { chapter, cues }
    }

    #[test]
    fn test_heading_carries_offset_prefix() {
        let chapter = Chapter::new(Duration::from_secs(90), "Main Topic");
        let doc = DocumentFormatter::new().format(vec![section(
            Some(chapter),
            vec![cue(95, "Some text.")],
        )]);

        assert_eq!(doc.sections.len(), 1);
        assert_eq!(
            doc.sections[0].heading.as_deref(),
            Some("[00:01:30] Main Topic")
        );
    }

    #[test]
    fn test_null_chapter_has_no_heading() {
        let doc = DocumentFormatter::new().format(vec![section(None, vec![cue(0, "Text.")])]);

        assert!(doc.sections[0].heading.is_none());
        assert_eq!(doc.sections[0].paragraphs.len(), 1);
    }

    #[test]
    fn test_sentence_count_closes_paragraphs() {
        // Eight single-sentence cues, default four sentences per paragraph
        let cues: Vec<Cue> = (0..8).map(|i| cue(i * 5, "One sentence here.")).collect();
        let doc = DocumentFormatter::new().format(vec![section(None, cues)]);

        assert_eq!(doc.sections[0].paragraphs.len(), 2);
    }

    #[test]
    fn test_char_cap_closes_punctuation_free_text() {
        let config = FormatConfig {
            max_paragraph_chars: 100,
            ..FormatConfig::default()
        };
        let cues: Vec<Cue> = (0..10)
            .map(|i| cue(i * 5, "no punctuation in this auto caption at all"))
            .collect();
        let doc = DocumentFormatter::with_config(config).format(vec![section(None, cues)]);

        assert!(doc.sections[0].paragraphs.len() > 1);
    }

    #[test]
    fn test_wrap_width_respected() {
        let config = FormatConfig {
            wrap_width: 30,
            ..FormatConfig::default()
        };
        let long = "word ".repeat(40);
        let doc =
            DocumentFormatter::with_config(config).format(vec![section(None, vec![cue(0, &long)])]);

        for paragraph in &doc.sections[0].paragraphs {
            for line in paragraph.text.lines() {
                assert!(line.len() <= 30, "line too long: {:?}", line);
            }
        }
    }

    #[test]
    fn test_no_text_lost_or_duplicated() {
        let cues = vec![
            cue(0, "First sentence."),
            cue(5, "Second one!"),
            cue(10, "Third?"),
            cue(15, "Fourth."),
            cue(20, "Fifth and final."),
        ];
        let expected: Vec<String> = cues
            .iter()
            .flat_map(|c| c.text.split_whitespace())
            .map(str::to_string)
            .collect();

        let doc = DocumentFormatter::new().format(vec![section(None, cues)]);
        let actual: Vec<String> = doc.sections[0]
            .paragraphs
            .iter()
            .flat_map(|p| p.text.split_whitespace())
            .map(str::to_string)
            .collect();

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_timestamp_markers_periodic_and_monotonic() {
        let config = FormatConfig {
            sentences_per_paragraph: 1,
            timestamp_interval: 2,
            ..FormatConfig::default()
        };
        let cues: Vec<Cue> = (0..6).map(|i| cue(i * 10, "A sentence.")).collect();
        let doc = DocumentFormatter::with_config(config).format(vec![section(None, cues)]);

        let paragraphs = &doc.sections[0].paragraphs;
        assert_eq!(paragraphs.len(), 6);
        assert!(paragraphs[0].leading_timestamp.is_some());
        assert!(paragraphs[1].leading_timestamp.is_none());
        assert!(paragraphs[2].leading_timestamp.is_some());

        let stamps: Vec<Duration> = paragraphs
            .iter()
            .filter_map(|p| p.leading_timestamp)
            .collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_first_paragraph_of_each_section_has_marker() {
        let chapters = vec![
            Chapter::new(Duration::from_secs(0), "One"),
            Chapter::new(Duration::from_secs(60), "Two"),
        ];
        let doc = DocumentFormatter::new().format(vec![
            section(Some(chapters[0].clone()), vec![cue(5, "Text.")]),
            section(Some(chapters[1].clone()), vec![cue(70, "More.")]),
        ]);

        for s in &doc.sections {
            assert!(s.paragraphs[0].leading_timestamp.is_some());
        }
    }
}
