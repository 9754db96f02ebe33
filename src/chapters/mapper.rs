/// Chapter-to-cue assignment
///
/// Both cues and chapters arrive time-ordered, so assignment is a monotonic
/// two-pointer merge rather than a per-cue search. Every input cue lands in
/// exactly one section, in its original order.
use super::Chapter;
use crate::captions::Cue;

/// The cues attributed to one chapter, or to the whole video when no
/// chapter information exists
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterSection {
    /// The owning chapter; `None` means no chapter information available
    pub chapter: Option<Chapter>,
    /// Cues whose start offset falls inside the chapter's time range
    pub cues: Vec<Cue>,
}

/// Assigns cues to the chapter whose time range contains their start offset
pub struct ChapterMapper;

impl ChapterMapper {
    /// Create a new mapper
    pub fn new() -> Self {
        Self
    }

    /// Group time-ordered cues into sections following chapter order.
    ///
    /// With an empty chapter list the whole transcript becomes a single
    /// section with no chapter. Cues that start before the first chapter
    /// are clamped into the first chapter rather than dropped.
    pub fn map(&self, cues: Vec<Cue>, chapters: &[Chapter]) -> Vec<ChapterSection> {
        if chapters.is_empty() {
            return vec![ChapterSection {
                chapter: None,
                cues,
            }];
        }

        let mut sections: Vec<ChapterSection> = Vec::new();
        let mut current: Option<usize> = None;
        let mut idx = 0;

        for cue in cues {
            while idx + 1 < chapters.len() && chapters[idx + 1].start <= cue.start {
                idx += 1;
            }

            match sections.last_mut() {
                Some(section) if current == Some(idx) => section.cues.push(cue),
                _ => {
                    sections.push(ChapterSection {
                        chapter: Some(chapters[idx].clone()),
                        cues: vec![cue],
                    });
                    current = Some(idx);
                }
            }
        }

        sections
    }
}

impl Default for ChapterMapper {
    fn default() -> Self {
        Self::new()
    }
}
