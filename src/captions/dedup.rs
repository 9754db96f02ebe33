/// Rolling-overlap deduplication
///
/// Auto-generated caption tracks repeat the tail of each cue at the head of
/// the next one for smooth-scroll rendering. This pass strips the repeated
/// prefix from every cue so each word survives exactly once, while keeping
/// the original time offsets for chapter mapping.
use super::Cue;

/// Removes overlapping and duplicate cue fragments
pub struct CueDeduplicator;

impl CueDeduplicator {
    /// Create a new deduplicator
    pub fn new() -> Self {
        Self
    }

    /// Deduplicate cues, preserving time order and original offsets.
    ///
    /// For each cue, the longest suffix of the previous retained text that
    /// is a prefix of the current text is stripped. Matching is
    /// case-sensitive on whitespace-normalized text and aligned to word
    /// boundaries. Cues left empty are dropped. Stripping runs to a fixed
    /// point, so a second pass over the output changes nothing.
    pub fn dedup(&self, mut cues: Vec<Cue>) -> Vec<Cue> {
        // Stable sort keeps the original order for equal start offsets
        cues.sort_by_key(|cue| cue.start);

        let mut retained: Vec<Cue> = Vec::with_capacity(cues.len());
        let mut prev_text: Option<String> = None;

        for cue in cues {
            let normalized = normalize_whitespace(&cue.text);
            let text = match &prev_text {
                Some(prev) => strip_overlap(prev, &normalized),
                None => normalized,
            };

            if text.is_empty() {
                continue;
            }

            prev_text = Some(text.clone());
            retained.push(Cue {
                start: cue.start,
                end: cue.end,
                text,
            });
        }

        retained
    }
}

impl Default for CueDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapse runs of whitespace to single spaces
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove from `cur` every leading word run that repeats the tail of
/// `prev`. Both inputs are already whitespace-normalized.
fn strip_overlap(prev: &str, cur: &str) -> String {
    let prev_words: Vec<&str> = prev.split(' ').collect();
    let mut cur_words: Vec<&str> = cur.split(' ').filter(|w| !w.is_empty()).collect();

    loop {
        let overlap = overlap_words(&prev_words, &cur_words);
        if overlap == 0 {
            break;
        }
        cur_words.drain(..overlap);
    }

    cur_words.join(" ")
}

/// Longest word count k such that the last k words of `prev` equal the
/// first k words of `cur`. Plain scan, longest candidate first.
fn overlap_words(prev: &[&str], cur: &[&str]) -> usize {
    let max = prev.len().min(cur.len());
    for k in (1..=max).rev() {
        if prev[prev.len() - k..] == cur[..k] {
            return k;
        }
    }
    0
}
