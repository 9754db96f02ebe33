/// Chapter handling
///
/// Chapters are named time ranges declared by the video publisher, supplied
/// by the metadata fetcher. The mapper reconciles deduplicated cues against
/// the chapter list so each text span lands in the chapter whose time range
/// contains it.

pub mod mapper;

// Re-export main types
pub use mapper::{ChapterMapper, ChapterSection};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A named time range within a video
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chapter {
    /// Offset of the chapter start from the beginning of the media.
    /// The last chapter implicitly extends to the end of the video.
    pub start: Duration,
    /// Chapter title as declared by the publisher
    pub title: String,
}

impl Chapter {
    /// Create a new chapter
    pub fn new(start: Duration, title: impl Into<String>) -> Self {
        Self {
            start,
            title: title.into(),
        }
    }
}
