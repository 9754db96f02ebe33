use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Semaphore};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::fetch::{VideoEntry, YtDlpFetcher};
use crate::output::{render_document, TranscriptWriter};
use crate::pipeline::TranscriptPipeline;
use crate::summarizer::TranscriptSummarizer;

/// Processing result for a single video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoOutcome {
    pub id: String,
    pub title: String,
    pub transcript_path: Option<PathBuf>,
    pub summary_path: Option<PathBuf>,
    pub chapter_count: usize,
    pub processing_time: Duration,
    pub status: VideoStatus,
    pub error_message: Option<String>,
}

/// Overall batch processing results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub total: usize,
    pub successful: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total_time: Duration,
    pub results: Vec<VideoOutcome>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum VideoStatus {
    Completed,
    Skipped,
    Failed,
}

/// Batch processor driving a whole channel through fetch, reconstruction
/// and persistence with bounded concurrency
#[derive(Clone)]
pub struct BatchProcessor {
    config: Config,
    fetcher: YtDlpFetcher,
    pipeline: Arc<TranscriptPipeline>,
    writer: TranscriptWriter,
    summarizer: Option<Arc<TranscriptSummarizer>>,
    worker_semaphore: Arc<Semaphore>,
}

impl BatchProcessor {
    pub async fn new(config: Config) -> Result<Self> {
        let max_workers = config.performance.max_workers;
        info!("🔧 Initializing BatchProcessor with {} workers", max_workers);

        // Summarization is best-effort; a missing backend degrades to
        // transcripts only
        let summarizer = if config.summarizer.enabled {
            match TranscriptSummarizer::new(config.summarizer.clone()).await {
                Ok(summarizer) => Some(Arc::new(summarizer)),
                Err(e) => {
                    warn!("⚠️ Summarizer unavailable, continuing without: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            fetcher: YtDlpFetcher::with_config(config.fetch.clone()),
            pipeline: Arc::new(TranscriptPipeline::with_config(config.format.clone())),
            writer: TranscriptWriter::new(&config.output.base_dir),
            summarizer,
            worker_semaphore: Arc::new(Semaphore::new(max_workers.max(1))),
            config,
        })
    }

    /// Process the latest videos of a channel
    pub async fn process_channel(
        &self,
        channel_url: &str,
        max_videos: usize,
    ) -> Result<ProcessingResult> {
        let start_time = Instant::now();

        info!("🚀 Starting channel processing...");
        info!("📡 Channel: {}", channel_url);

        tokio::fs::create_dir_all(&self.config.output.base_dir).await?;

        let videos = self
            .fetcher
            .list_channel_videos(channel_url, max_videos)
            .await
            .context("listing channel videos")?;

        if videos.is_empty() {
            warn!("No videos found for {}", channel_url);
            return Ok(ProcessingResult {
                total: 0,
                successful: 0,
                skipped: 0,
                failed: 0,
                total_time: start_time.elapsed(),
                results: Vec::new(),
            });
        }

        let results = self.process_videos_parallel(videos).await;

        let total_time = start_time.elapsed();
        let successful = results
            .iter()
            .filter(|r| r.status == VideoStatus::Completed)
            .count();
        let skipped = results
            .iter()
            .filter(|r| r.status == VideoStatus::Skipped)
            .count();
        let failed = results.len() - successful - skipped;

        let processing_result = ProcessingResult {
            total: results.len(),
            successful,
            skipped,
            failed,
            total_time,
            results,
        };

        if self.config.output.save_results {
            let results_path = self.config.output.base_dir.join("processing_results.json");
            let json_data = serde_json::to_string_pretty(&processing_result)?;
            tokio::fs::write(&results_path, json_data).await?;
            info!("💾 Results saved to: {}", results_path.display());
        }

        Ok(processing_result)
    }

    /// Run per-video processing with controlled concurrency
    async fn process_videos_parallel(&self, videos: Vec<VideoEntry>) -> Vec<VideoOutcome> {
        let total_videos = videos.len();
        let (tx, mut rx) = mpsc::channel(total_videos);

        for (index, video) in videos.into_iter().enumerate() {
            let processor = self.clone();
            let tx = tx.clone();
            let semaphore = Arc::clone(&self.worker_semaphore);

            tokio::spawn(async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(_) => return,
                };

                info!(
                    "📹 Processing video {}/{}: {}",
                    index + 1,
                    total_videos,
                    video.title
                );

                let outcome = processor.process_single_video(&video).await;
                if let Err(e) = tx.send(outcome).await {
                    error!("Failed to send result: {}", e);
                }
            });
        }
        drop(tx);

        let mut results = Vec::new();
        while let Some(outcome) = rx.recv().await {
            match outcome.status {
                VideoStatus::Completed => {
                    info!(
                        "✅ Completed: {} in {:.2}s",
                        outcome.title,
                        outcome.processing_time.as_secs_f64()
                    );
                }
                VideoStatus::Skipped => {
                    info!("⏭️ Skipped (transcript exists): {}", outcome.title);
                }
                VideoStatus::Failed => {
                    warn!(
                        "❌ Failed: {} - {}",
                        outcome.title,
                        outcome.error_message.as_deref().unwrap_or("unknown error")
                    );
                }
            }
            results.push(outcome);
        }

        results
    }

    /// Fetch, reconstruct and persist one video's transcript.
    ///
    /// Failures are captured in the outcome so one bad video never aborts
    /// the batch.
    async fn process_single_video(&self, video: &VideoEntry) -> VideoOutcome {
        let start_time = Instant::now();
        let mut outcome = VideoOutcome {
            id: video.id.clone(),
            title: video.title.clone(),
            transcript_path: None,
            summary_path: None,
            chapter_count: 0,
            processing_time: Duration::from_secs(0),
            status: VideoStatus::Failed,
            error_message: None,
        };

        match self.run_stages(video, &mut outcome).await {
            Ok(()) => {}
            Err(e) => {
                outcome.status = VideoStatus::Failed;
                outcome.error_message = Some(format!("{:#}", e));
            }
        }

        outcome.processing_time = start_time.elapsed();
        outcome
    }

    async fn run_stages(&self, video: &VideoEntry, outcome: &mut VideoOutcome) -> Result<()> {
        let meta = self
            .fetcher
            .fetch_metadata(&video.url)
            .await
            .with_context(|| format!("fetching metadata for video {}", video.id))?;
        outcome.chapter_count = meta.chapters.len();
        outcome.title = meta.title.clone();

        let transcript_path = self.writer.transcript_path(&meta);
        if self.config.output.skip_existing && transcript_path.exists() {
            outcome.status = VideoStatus::Skipped;
            outcome.transcript_path = Some(transcript_path);
            return Ok(());
        }

        let raw_captions = self
            .fetcher
            .fetch_captions(&video.url, &video.id)
            .await
            .with_context(|| format!("fetching captions for video {}", video.id))?;

        let document = self
            .pipeline
            .reconstruct(&raw_captions, &meta.chapters)
            .with_context(|| format!("reconstructing transcript for video {}", video.id))?;

        let path = self.writer.write_transcript(&meta, &document).await?;
        outcome.transcript_path = Some(path);
        outcome.status = VideoStatus::Completed;

        // Summaries are best-effort; a failure leaves the transcript intact
        if let Some(summarizer) = &self.summarizer {
            let transcript_text = render_document(&document);
            match summarizer.summarize(&transcript_text, &meta.chapters).await {
                Ok(summary) => {
                    outcome.summary_path = Some(self.writer.write_summary(&meta, &summary).await?);
                }
                Err(e) => {
                    warn!("⚠️ Summarization failed for {}: {}", video.id, e);
                }
            }
        }

        Ok(())
    }
}
