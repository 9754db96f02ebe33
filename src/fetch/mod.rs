/// Caption and metadata fetching
///
/// Boundary collaborators for the pipeline: listing a channel's latest
/// videos, fetching per-video metadata (title, publish date, chapter list)
/// and downloading the subtitle track, all through yt-dlp as a subprocess.
/// The core pipeline is invoked only after these succeed.

pub mod ytdlp;

// Re-export main types
pub use ytdlp::{FetchConfig, YtDlpFetcher};

use crate::chapters::Chapter;
use serde::{Deserialize, Serialize};

/// Errors at the fetch boundary
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yt-dlp failed: {0}")]
    CommandFailed(String),

    #[error("no captions available for video {0}")]
    NoCaptions(String),

    #[error("invalid channel URL: {0}")]
    InvalidUrl(String),

    #[error("unexpected metadata payload: {0}")]
    InvalidMetadata(String),
}

/// One entry of a channel's video listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoEntry {
    /// Video identifier
    pub id: String,
    /// Video title
    pub title: String,
    /// Watch page URL
    pub url: String,
}

/// Per-video metadata relevant to transcript reconstruction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMeta {
    /// Video identifier
    pub id: String,
    /// Video title
    pub title: String,
    /// Publish date as reported upstream (YYYYMMDD or ISO-8601), if any
    pub upload_date: Option<String>,
    /// Publish time as unix seconds, if any
    pub timestamp: Option<i64>,
    /// Publisher-declared chapter list, possibly empty, ordered by start
    pub chapters: Vec<Chapter>,
}
