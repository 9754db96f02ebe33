use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;
use yt_transcript_analyzer::{Chapter, CueDeduplicator, CueParser, TranscriptPipeline};

/// Synthetic rolling caption stream resembling yt-dlp auto-subs
fn rolling_vtt(cue_count: usize) -> String {
    let mut out = String::from("WEBVTT\nKind: captions\nLanguage: en\n\n");

    for i in 0..cue_count {
        let start = i * 3;
        let end = start + 3;
        out.push_str(&format!(
            "00:{:02}:{:02}.000 --> 00:{:02}:{:02}.000\n",
            start / 60,
            start % 60,
            end / 60,
            end % 60
        ));
        // Each cue repeats the previous cue's trailing words
        out.push_str(&format!(
            "segment {} overlap segment {} overlap\n\n",
            i.saturating_sub(1),
            i
        ));
    }

    out
}

fn bench_parser(c: &mut Criterion) {
    let raw = rolling_vtt(500);
    let parser = CueParser::new();

    c.bench_function("parse_500_cues", |b| {
        b.iter(|| black_box(parser.parse(black_box(&raw)).unwrap()))
    });
}

fn bench_dedup(c: &mut Criterion) {
    let raw = rolling_vtt(500);
    let cues = CueParser::new().parse(&raw).unwrap();
    let dedup = CueDeduplicator::new();

    c.bench_function("dedup_500_cues", |b| {
        b.iter(|| black_box(dedup.dedup(black_box(cues.clone()))))
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let raw = rolling_vtt(500);
    let chapters: Vec<Chapter> = (0..10)
        .map(|i| Chapter::new(Duration::from_secs(i * 150), format!("Chapter {}", i + 1)))
        .collect();
    let pipeline = TranscriptPipeline::new();

    c.bench_function("reconstruct_500_cues_10_chapters", |b| {
        b.iter(|| black_box(pipeline.reconstruct(black_box(&raw), black_box(&chapters)).unwrap()))
    });
}

criterion_group!(benches, bench_parser, bench_dedup, bench_full_pipeline);
criterion_main!(benches);
