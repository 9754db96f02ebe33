/// Structured transcript documents
///
/// The formatter's output model: an ordered list of sections, each carrying
/// an optional chapter heading and the wrapped paragraphs attributed to it.
/// The document is a pure in-memory value; rendering it to text and
/// persisting it is the writer's job.

pub mod formatter;

// Re-export main types
pub use formatter::{DocumentFormatter, FormatConfig};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A formatted paragraph with an optional leading timestamp marker
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paragraph {
    /// Start offset of the first cue contributing to this paragraph.
    /// `None` when no marker should be shown for this paragraph.
    pub leading_timestamp: Option<Duration>,
    /// Wrapped paragraph text, lines joined with newlines
    pub text: String,
}

/// One heading-plus-paragraphs unit of the final document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentSection {
    /// Chapter heading, `None` in no-chapter mode
    pub heading: Option<String>,
    /// Paragraphs in original time order
    pub paragraphs: Vec<Paragraph>,
}

/// A complete reconstructed transcript document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Sections in chapter order
    pub sections: Vec<DocumentSection>,
}

impl Document {
    /// True when the document carries no paragraphs at all
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.paragraphs.is_empty())
    }
}
