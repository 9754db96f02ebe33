use anyhow::Result;
use clap::{Arg, Command};
use std::path::PathBuf;
use tracing::{error, info, warn};

use yt_transcript_analyzer::{BatchProcessor, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("yt_transcript_analyzer=info,warn")
        .init();

    let matches = Command::new("YouTube Transcript Analyzer (Rust)")
        .version("0.1.0")
        .about("Reconstructs chapter-aware transcripts from channel subtitle tracks")
        .arg(
            Arg::new("channel-url")
                .short('c')
                .long("channel-url")
                .value_name("URL")
                .help("YouTube channel URL to process")
                .required(true),
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_name("DIR")
                .help("Output directory for transcripts and summaries")
                .default_value("./output"),
        )
        .arg(
            Arg::new("max-videos")
                .short('n')
                .long("max-videos")
                .value_name("NUM")
                .help("Maximum number of latest videos to process")
                .default_value("20"),
        )
        .arg(
            Arg::new("workers")
                .short('w')
                .long("workers")
                .value_name("NUM")
                .help("Number of videos processed in parallel")
                .default_value("4"),
        )
        .arg(
            Arg::new("summarize")
                .short('s')
                .long("summarize")
                .help("Generate AI summaries after writing transcripts")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let channel_url = matches.get_one::<String>("channel-url").unwrap().clone();
    let output_dir = PathBuf::from(matches.get_one::<String>("output-dir").unwrap());
    let max_videos: usize = matches.get_one::<String>("max-videos").unwrap().parse()?;
    let workers: usize = matches.get_one::<String>("workers").unwrap().parse()?;
    let summarize = matches.get_flag("summarize");

    // Load configuration and apply CLI overrides
    let mut config = Config::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });
    config.output.base_dir = output_dir;
    config.performance.max_workers = workers;
    if summarize {
        config.summarizer.enabled = true;
    }

    info!("🚀 YouTube Transcript Analyzer (Rust) starting...");
    info!("📡 Channel: {}", channel_url);
    info!("📂 Output directory: {}", config.output.base_dir.display());
    info!("🔧 Workers: {}", workers);

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(e);
    }

    // Initialize batch processor
    let processor = BatchProcessor::new(config).await?;

    // Start processing
    let results = processor.process_channel(&channel_url, max_videos).await?;

    // Print results
    info!(
        "🎉 Processing completed in {:.2}s",
        results.total_time.as_secs_f64()
    );
    info!("✅ Successful: {}", results.successful);
    info!("⏭️ Skipped: {}", results.skipped);
    info!("❌ Failed: {}", results.failed);
    info!(
        "📊 Success rate: {:.1}%",
        if results.total > 0 {
            results.successful as f64 / results.total as f64 * 100.0
        } else {
            0.0
        }
    );

    Ok(())
}
