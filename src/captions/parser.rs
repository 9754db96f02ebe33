/// Caption stream parser
///
/// Turns raw WebVTT/SRT text into ordered cues. Header and metadata lines
/// before the first timing line are ignored, numeric cue-index lines are
/// skipped, and inline markup tags are stripped so only visible characters
/// survive.
use super::{parse_timestamp, Cue};
use crate::error::TranscriptError;
use regex::Regex;
use std::time::Duration;
use tracing::warn;

/// Parser for raw time-coded caption streams
pub struct CueParser {
    timing_line: Regex,
    markup_tag: Regex,
}

impl CueParser {
    /// Create a new parser with compiled patterns
    pub fn new() -> Self {
        Self {
            timing_line: Regex::new(
                r"^\s*((?:\d{1,2}:)?\d{2}:\d{2}[.,]\d{3})\s*-->\s*((?:\d{1,2}:)?\d{2}:\d{2}[.,]\d{3})",
            )
            .unwrap(),
            markup_tag: Regex::new(r"<[^>]*>|\{[^}]*\}").unwrap(),
        }
    }

    /// Parse raw caption text into an ordered sequence of cues.
    ///
    /// Fails with `UnrecognizedCaptions` when the input contains no timing
    /// line at all. Malformed individual cue blocks (inverted time range,
    /// missing text) are logged and skipped, not fatal.
    pub fn parse(&self, raw: &str) -> Result<Vec<Cue>, TranscriptError> {
        let mut cues = Vec::new();
        let mut saw_timing_line = false;

        let mut pending: Option<(Duration, Duration)> = None;
        let mut text_lines: Vec<String> = Vec::new();

        for line in raw.lines() {
            if let Some(caps) = self.timing_line.captures(line) {
                saw_timing_line = true;
                Self::flush(&mut pending, &mut text_lines, &mut cues);

                match (parse_timestamp(&caps[1]), parse_timestamp(&caps[2])) {
                    (Ok(start), Ok(end)) => pending = Some((start, end)),
                    (Err(e), _) | (_, Err(e)) => {
                        warn!("⚠️ Skipping cue with unparseable timing line '{}': {}", line.trim(), e);
                        pending = None;
                    }
                }
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                Self::flush(&mut pending, &mut text_lines, &mut cues);
                continue;
            }

            // Header/metadata lines before the first timing line, and any
            // lines between cue blocks, carry no caption text.
            if pending.is_none() {
                continue;
            }

            if is_cue_index(trimmed) {
                continue;
            }

            let visible = self.markup_tag.replace_all(trimmed, "");
            let visible = visible.trim();
            if !visible.is_empty() {
                text_lines.push(visible.to_string());
            }
        }
        Self::flush(&mut pending, &mut text_lines, &mut cues);

        if !saw_timing_line {
            return Err(TranscriptError::UnrecognizedCaptions);
        }

        Ok(cues)
    }

    /// Close out the current cue block, if any
    fn flush(
        pending: &mut Option<(Duration, Duration)>,
        text_lines: &mut Vec<String>,
        cues: &mut Vec<Cue>,
    ) {
        let Some((start, end)) = pending.take() else {
            text_lines.clear();
            return;
        };

        let text = text_lines.join(" ");
        text_lines.clear();

        if text.trim().is_empty() {
            warn!("⚠️ Cue at {} has no text, skipping", super::format_timestamp(start));
            return;
        }
        if start > end {
            warn!(
                "⚠️ Cue at {} has inverted time range, skipping",
                super::format_timestamp(start)
            );
            return;
        }

        cues.push(Cue::new(start, end, text));
    }
}

impl Default for CueParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A bare sequence number line, as SRT emits between cue blocks
fn is_cue_index(line: &str) -> bool {
    !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit())
}
