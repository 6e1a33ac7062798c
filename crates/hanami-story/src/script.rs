use strum_macros::Display;
use thiserror::Error;

/// A participant in the story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Speaker {
    Nobita,
    Shizuka,
    /// Joint marker used when both characters share a line.
    Both,
}

/// Presentation tag for an entry. At most one applies to any line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum EntryFlag {
    #[default]
    None,
    Proposal,
    Acceptance,
    Finale,
}

/// One line of dialogue with its narrative progress and presentation tag.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueEntry {
    pub speaker: Speaker,
    pub text: String,
    /// Narrative completion in [0, 100], non-decreasing across the script.
    pub progress: u8,
    pub flag: EntryFlag,
}

impl DialogueEntry {
    fn new(speaker: Speaker, text: &str, progress: u8) -> Self {
        Self {
            speaker,
            text: text.to_string(),
            progress,
            flag: EntryFlag::None,
        }
    }

    fn flagged(speaker: Speaker, text: &str, progress: u8, flag: EntryFlag) -> Self {
        Self {
            speaker,
            text: text.to_string(),
            progress,
            flag,
        }
    }

    /// Chapter number shown alongside the progress indicator.
    pub fn chapter(&self) -> u8 {
        self.progress / 10 + 1
    }

    /// Label for the progress indicator, e.g. "Chapter 10: Shizuka's Moment".
    pub fn chapter_label(&self) -> String {
        format!("Chapter {}: {}'s Moment", self.chapter(), self.speaker)
    }
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("script has no entries")]
    Empty,
    #[error("entry {index}: progress {progress} is out of range")]
    ProgressOutOfRange { index: usize, progress: u8 },
    #[error("entry {index}: progress {progress} decreases from {previous}")]
    ProgressNotMonotonic {
        index: usize,
        progress: u8,
        previous: u8,
    },
}

/// An ordered, fixed dialogue script. Entries are read-only after construction.
#[derive(Debug, Clone)]
pub struct StoryScript {
    entries: Vec<DialogueEntry>,
}

impl StoryScript {
    /// Validates the script invariants: non-empty, progress within [0, 100]
    /// and non-decreasing from entry to entry.
    pub fn new(entries: Vec<DialogueEntry>) -> Result<Self, ScriptError> {
        if entries.is_empty() {
            return Err(ScriptError::Empty);
        }

        let mut previous = 0u8;
        for (index, entry) in entries.iter().enumerate() {
            if entry.progress > 100 {
                return Err(ScriptError::ProgressOutOfRange {
                    index,
                    progress: entry.progress,
                });
            }
            if entry.progress < previous {
                return Err(ScriptError::ProgressNotMonotonic {
                    index,
                    progress: entry.progress,
                    previous,
                });
            }
            previous = entry.progress;
        }

        Ok(Self { entries })
    }

    /// The bundled proposal story: Nobita and Shizuka under the cherry trees.
    pub fn proposal_story() -> Self {
        use EntryFlag::{Acceptance, Finale, Proposal};
        use Speaker::{Both, Nobita, Shizuka};

        Self::new(vec![
            DialogueEntry::new(
                Nobita,
                "Shizuka... can we talk? There's something I've been wanting to tell you for so long.",
                0,
            ),
            DialogueEntry::new(
                Shizuka,
                "Of course, Nobita. You look so serious today. What is it?",
                10,
            ),
            DialogueEntry::new(
                Nobita,
                "I know I'm not the smartest, or the strongest, or the most talented guy...",
                20,
            ),
            DialogueEntry::new(
                Shizuka,
                "Nobita, that's not true. You have the biggest heart of anyone I know.",
                30,
            ),
            DialogueEntry::new(
                Nobita,
                "But when I'm with you, I feel like I can do anything. You make me want to be better.",
                40,
            ),
            DialogueEntry::new(
                Shizuka,
                "You already make me smile every day with your kindness and determination.",
                50,
            ),
            DialogueEntry::new(
                Nobita,
                "Shizuka, I've loved you since we were kids. Every moment with you is precious to me.",
                60,
            ),
            DialogueEntry::new(Shizuka, "Nobita... (blushes deeply)", 70),
            DialogueEntry::new(
                Nobita,
                "I promise to always protect you, to make you laugh, to be by your side forever.",
                80,
            ),
            DialogueEntry::flagged(Nobita, "Shizuka, will you marry me?", 90, Proposal),
            DialogueEntry::flagged(
                Shizuka,
                "Yes! Yes, Nobita! A thousand times yes! I love you too!",
                95,
                Acceptance,
            ),
            DialogueEntry::flagged(Both, "❤️ Together Forever ❤️", 100, Finale),
        ])
        .expect("bundled script is valid")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> &DialogueEntry {
        &self.entries[index]
    }

    pub fn entries(&self) -> &[DialogueEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_script_shape() {
        let script = StoryScript::proposal_story();
        assert_eq!(script.len(), 12);

        assert_eq!(script.entry(0).progress, 0);
        assert_eq!(script.entry(9).flag, EntryFlag::Proposal);
        assert_eq!(script.entry(10).flag, EntryFlag::Acceptance);

        let finale = script.entry(11);
        assert_eq!(finale.flag, EntryFlag::Finale);
        assert_eq!(finale.speaker, Speaker::Both);
        assert_eq!(finale.progress, 100);
    }

    #[test]
    fn chapter_derivation() {
        let script = StoryScript::proposal_story();
        assert_eq!(script.entry(0).chapter(), 1);
        assert_eq!(script.entry(9).chapter(), 10);
        assert_eq!(script.entry(10).chapter(), 10); // progress 95
        assert_eq!(script.entry(11).chapter(), 11);
    }

    #[test]
    fn chapter_label_format() {
        let script = StoryScript::proposal_story();
        assert_eq!(script.entry(1).chapter_label(), "Chapter 2: Shizuka's Moment");
        assert_eq!(script.entry(11).chapter_label(), "Chapter 11: Both's Moment");
    }

    #[test]
    fn empty_script_rejected() {
        assert!(matches!(StoryScript::new(vec![]), Err(ScriptError::Empty)));
    }

    #[test]
    fn out_of_range_progress_rejected() {
        let entries = vec![DialogueEntry::new(Speaker::Nobita, "hi", 101)];
        assert!(matches!(
            StoryScript::new(entries),
            Err(ScriptError::ProgressOutOfRange { index: 0, .. })
        ));
    }

    #[test]
    fn decreasing_progress_rejected() {
        let entries = vec![
            DialogueEntry::new(Speaker::Nobita, "hi", 50),
            DialogueEntry::new(Speaker::Shizuka, "oh", 40),
        ];
        assert!(matches!(
            StoryScript::new(entries),
            Err(ScriptError::ProgressNotMonotonic { index: 1, .. })
        ));
    }

    #[test]
    fn equal_progress_allowed() {
        let entries = vec![
            DialogueEntry::new(Speaker::Nobita, "hi", 50),
            DialogueEntry::new(Speaker::Shizuka, "oh", 50),
        ];
        assert!(StoryScript::new(entries).is_ok());
    }
}
