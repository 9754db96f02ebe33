/// Caption stream handling
///
/// This module parses raw time-coded caption text (WebVTT as produced by
/// yt-dlp, SRT-style comma timestamps also accepted) into discrete cues and
/// removes the rolling-overlap duplication that auto-generated captions emit
/// for smooth-scroll rendering.

pub mod dedup;
pub mod parser;

// Re-export main types
pub use dedup::CueDeduplicator;
pub use parser::CueParser;

use crate::error::TranscriptError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single timestamped caption fragment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cue {
    /// Offset of the cue start from the beginning of the media
    pub start: Duration,
    /// Offset of the cue end from the beginning of the media
    pub end: Duration,
    /// Visible caption text, whitespace-trimmed
    pub text: String,
}

impl Cue {
    /// Create a new cue with trimmed text
    pub fn new(start: Duration, end: Duration, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into().trim().to_string(),
        }
    }
}

/// Parse a caption timestamp (`HH:MM:SS.mmm`, hours optional, comma accepted
/// as the millisecond separator) into a duration offset.
pub fn parse_timestamp(raw: &str) -> Result<Duration, TranscriptError> {
    let token = raw.trim();
    let invalid = || TranscriptError::InvalidTimestamp(token.to_string());

    let (clock, millis_str) = token.rsplit_once(['.', ',']).ok_or_else(invalid)?;
    if millis_str.is_empty() || millis_str.len() > 3 || !millis_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let millis: u64 = millis_str.parse().map_err(|_| invalid())?;

    let fields: Vec<&str> = clock.split(':').collect();
    let (hours, minutes, seconds): (u64, u64, u64) = match fields.as_slice() {
        [h, m, s] => (
            h.parse().map_err(|_| invalid())?,
            m.parse().map_err(|_| invalid())?,
            s.parse().map_err(|_| invalid())?,
        ),
        [m, s] => (
            0,
            m.parse().map_err(|_| invalid())?,
            s.parse().map_err(|_| invalid())?,
        ),
        _ => return Err(invalid()),
    };

    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }

    let total_millis = (hours * 3600 + minutes * 60 + seconds) * 1000 + millis;
    Ok(Duration::from_millis(total_millis))
}

/// Format a duration offset as a caption timestamp (HH:MM:SS.mmm)
pub fn format_timestamp(offset: Duration) -> String {
    let total_seconds = offset.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    let milliseconds = offset.subsec_millis();

    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
}

/// Format a duration offset as a short marker (HH:MM:SS)
pub fn format_offset(offset: Duration) -> String {
    let total_seconds = offset.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
