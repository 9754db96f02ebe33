/// yt-dlp subprocess driver
///
/// Shells out to yt-dlp for channel listings, per-video metadata and
/// subtitle downloads. Media is never downloaded; only subtitle files and
/// JSON metadata cross this boundary.
use super::{FetchError, VideoEntry, VideoMeta};
use crate::chapters::Chapter;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Settings for the yt-dlp boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// yt-dlp binary to invoke
    pub binary: String,
    /// Subtitle language to request
    pub subtitle_lang: String,
    /// Accept auto-generated subtitles when no manual track exists
    pub allow_auto_subs: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            binary: "yt-dlp".to_string(),
            subtitle_lang: "en".to_string(),
            allow_auto_subs: true,
        }
    }
}

/// Fetches channel listings, metadata and subtitle tracks via yt-dlp
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    config: FetchConfig,
}

impl YtDlpFetcher {
    /// Create a fetcher with default settings
    pub fn new() -> Self {
        Self::with_config(FetchConfig::default())
    }

    /// Create a fetcher with custom settings
    pub fn with_config(config: FetchConfig) -> Self {
        Self { config }
    }

    /// List the latest videos of a channel, newest first
    pub async fn list_channel_videos(
        &self,
        channel_url: &str,
        max_videos: usize,
    ) -> Result<Vec<VideoEntry>, FetchError> {
        Url::parse(channel_url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", channel_url, e)))?;

        info!("🔍 Listing up to {} videos from {}", max_videos, channel_url);

        let output = tokio::process::Command::new(&self.config.binary)
            .args([
                "--dump-json",
                "--flat-playlist",
                "--playlist-end",
                &max_videos.to_string(),
                channel_url,
            ])
            .output()
            .await?;

        if !output.status.success() {
            return Err(FetchError::CommandFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut videos = Vec::new();
        for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
            match parse_listing_line(line) {
                Ok(entry) => videos.push(entry),
                Err(e) => warn!("⚠️ Skipping unreadable listing entry: {}", e),
            }
        }

        info!("📹 Found {} videos", videos.len());
        Ok(videos)
    }

    /// Fetch title, publish date and chapter list for one video
    pub async fn fetch_metadata(&self, video_url: &str) -> Result<VideoMeta, FetchError> {
        debug!("Fetching metadata for {}", video_url);

        let output = tokio::process::Command::new(&self.config.binary)
            .args(["--dump-json", "--skip-download", video_url])
            .output()
            .await?;

        if !output.status.success() {
            return Err(FetchError::CommandFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        parse_metadata(&String::from_utf8_lossy(&output.stdout))
    }

    /// Download the subtitle track for one video and return its raw text
    pub async fn fetch_captions(
        &self,
        video_url: &str,
        video_id: &str,
    ) -> Result<String, FetchError> {
        let scratch = tempfile::tempdir()?;
        let template = scratch.path().join("%(id)s.%(ext)s");

        let mut args: Vec<String> = vec![
            "--skip-download".to_string(),
            "--write-subs".to_string(),
            "--sub-langs".to_string(),
            self.config.subtitle_lang.clone(),
            "--sub-format".to_string(),
            "vtt".to_string(),
            "-o".to_string(),
            template.to_string_lossy().to_string(),
        ];
        if self.config.allow_auto_subs {
            args.insert(2, "--write-auto-subs".to_string());
        }
        args.push(video_url.to_string());

        let output = tokio::process::Command::new(&self.config.binary)
            .args(&args)
            .output()
            .await?;

        if !output.status.success() {
            return Err(FetchError::CommandFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        // yt-dlp names the file <id>.<lang>.vtt; language tags can carry
        // regional suffixes, so take any .vtt it produced
        let mut entries = tokio::fs::read_dir(scratch.path()).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "vtt") {
                let raw = tokio::fs::read_to_string(&path).await?;
                debug!("Downloaded {} bytes of captions for {}", raw.len(), video_id);
                return Ok(raw);
            }
        }

        Err(FetchError::NoCaptions(video_id.to_string()))
    }
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct RawListingEntry {
    id: String,
    title: Option<String>,
    url: Option<String>,
    webpage_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawChapter {
    start_time: Option<f64>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    id: String,
    title: Option<String>,
    upload_date: Option<String>,
    timestamp: Option<i64>,
    chapters: Option<Vec<RawChapter>>,
}

/// Parse one line of `--dump-json --flat-playlist` output
fn parse_listing_line(line: &str) -> Result<VideoEntry, FetchError> {
    let raw: RawListingEntry =
        serde_json::from_str(line).map_err(|e| FetchError::InvalidMetadata(e.to_string()))?;

    let url = raw
        .webpage_url
        .or(raw.url)
        .unwrap_or_else(|| format!("https://www.youtube.com/watch?v={}", raw.id));

    Ok(VideoEntry {
        title: raw.title.unwrap_or_else(|| "Unknown Title".to_string()),
        id: raw.id,
        url,
    })
}

/// Parse a `--dump-json` metadata payload into the fields the pipeline
/// cares about
fn parse_metadata(payload: &str) -> Result<VideoMeta, FetchError> {
    let raw: RawMetadata = serde_json::from_str(payload.trim())
        .map_err(|e| FetchError::InvalidMetadata(e.to_string()))?;

    let mut chapters: Vec<Chapter> = raw
        .chapters
        .unwrap_or_default()
        .into_iter()
        .filter_map(|c| {
            let start = c.start_time?;
            if !start.is_finite() || start < 0.0 {
                return None;
            }
            Some(Chapter::new(
                Duration::from_secs_f64(start),
                c.title.unwrap_or_else(|| "Untitled".to_string()),
            ))
        })
        .collect();
    chapters.sort_by_key(|c| c.start);
    chapters.dedup_by_key(|c| c.start);

    Ok(VideoMeta {
        title: raw.title.unwrap_or_else(|| "Unknown Title".to_string()),
        id: raw.id,
        upload_date: raw.upload_date,
        timestamp: raw.timestamp,
        chapters,
    })
}
