use std::time::{Duration, Instant};

use tracing::debug;

use crate::events::StoryEvent;
use crate::script::{DialogueEntry, EntryFlag, StoryScript};
use crate::timer::{TimerId, Timers};

/// Cursor into a fixed script. Advancing past the last entry wraps to the
/// start; the operation is total over a non-empty script.
pub struct Sequencer {
    script: StoryScript,
    cursor: usize,
}

impl Sequencer {
    pub fn new(script: StoryScript) -> Self {
        Self { script, cursor: 0 }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &DialogueEntry {
        self.script.entry(self.cursor)
    }

    pub fn script(&self) -> &StoryScript {
        &self.script
    }

    /// Move to the next entry. Returns the new entry and whether the script
    /// wrapped back to the start.
    pub fn advance(&mut self) -> (&DialogueEntry, bool) {
        self.cursor = (self.cursor + 1) % self.script.len();
        let wrapped = self.cursor == 0;
        (self.script.entry(self.cursor), wrapped)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlaybackTimer {
    AutoAdvance,
}

/// Hearts spawned when a flagged entry comes on display.
const PROPOSAL_HEARTS: u32 = 10;
const ACCEPTANCE_HEARTS: u32 = 20;
const FINALE_HEARTS: u32 = 30;

/// The sequencer plus its auto-advance clockwork.
///
/// At most one auto-advance deadline is outstanding at any time: arming
/// always cancels the previous deadline first, and a user advance while
/// auto-play is on restarts the full period rather than stacking.
pub struct Playback {
    sequencer: Sequencer,
    timers: Timers<PlaybackTimer>,
    pending: Option<TimerId>,
    auto_play: bool,
    period: Duration,
}

impl Playback {
    pub fn new(script: StoryScript, auto_play: bool, period: Duration) -> Self {
        Self {
            sequencer: Sequencer::new(script),
            timers: Timers::new(),
            pending: None,
            auto_play,
            period,
        }
    }

    /// Show the opening entry and, if auto-play is on, arm the first advance.
    pub fn start(&mut self, now: Instant) -> Vec<StoryEvent> {
        let mut events = vec![StoryEvent::DialogueShown {
            index: self.sequencer.cursor(),
            entry: self.sequencer.current().clone(),
        }];
        events.extend(cue_events(self.sequencer.current()));

        if self.auto_play {
            self.arm(now);
        }
        events
    }

    pub fn cursor(&self) -> usize {
        self.sequencer.cursor()
    }

    pub fn current(&self) -> &DialogueEntry {
        self.sequencer.current()
    }

    pub fn script(&self) -> &StoryScript {
        self.sequencer.script()
    }

    pub fn auto_play(&self) -> bool {
        self.auto_play
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of outstanding auto-advance deadlines. One while auto-play is
    /// on, zero while it is off.
    pub fn pending_advances(&self) -> usize {
        self.timers.active_count()
    }

    /// User-driven advance. Resets the auto-play period when it is running.
    pub fn handle_user_advance(&mut self, now: Instant) -> Vec<StoryEvent> {
        let events = self.advance();
        if self.auto_play {
            self.arm(now);
        }
        events
    }

    /// Flip auto-play, arming or cancelling the pending advance.
    pub fn toggle_auto_play(&mut self, now: Instant) -> Vec<StoryEvent> {
        self.auto_play = !self.auto_play;
        if self.auto_play {
            self.arm(now);
        } else {
            self.disarm();
        }
        debug!(enabled = self.auto_play, "auto-play toggled");
        vec![StoryEvent::AutoPlayToggled {
            enabled: self.auto_play,
        }]
    }

    /// Fire any due auto-advance. The deadline reschedules itself: each fire
    /// consumes the pending handle, advances, then arms the next period.
    pub fn tick(&mut self, now: Instant) -> Vec<StoryEvent> {
        let mut events = Vec::new();
        for (id, _tag) in self.timers.tick(now) {
            if self.pending == Some(id) {
                self.pending = None;
                events.extend(self.advance());
                if self.auto_play {
                    self.arm(now);
                }
            }
        }
        events
    }

    fn advance(&mut self) -> Vec<StoryEvent> {
        let (entry, wrapped) = self.sequencer.advance();
        let entry = entry.clone();
        let index = self.sequencer.cursor();
        debug!(index, speaker = %entry.speaker, "dialogue advanced");

        let mut events = Vec::new();
        if wrapped {
            events.push(StoryEvent::Restarted);
        }
        events.push(StoryEvent::DialogueShown {
            index,
            entry: entry.clone(),
        });
        events.extend(cue_events(&entry));
        events
    }

    /// Cancel-if-present, then schedule. Never chain implicitly.
    fn arm(&mut self, now: Instant) {
        if let Some(id) = self.pending.take() {
            self.timers.cancel(id);
        }
        self.pending = Some(
            self.timers
                .schedule_once(self.period, PlaybackTimer::AutoAdvance, now),
        );
    }

    fn disarm(&mut self) {
        if let Some(id) = self.pending.take() {
            self.timers.cancel(id);
        }
    }
}

/// Cosmetic cues attached to an entry coming on display.
fn cue_events(entry: &DialogueEntry) -> Vec<StoryEvent> {
    match entry.flag {
        EntryFlag::Proposal => vec![
            StoryEvent::HeartsBurst {
                count: PROPOSAL_HEARTS,
            },
            StoryEvent::RingLift,
        ],
        EntryFlag::Acceptance => vec![
            StoryEvent::HeartsBurst {
                count: ACCEPTANCE_HEARTS,
            },
            StoryEvent::Embrace,
        ],
        EntryFlag::Finale => vec![StoryEvent::HeartsBurst {
            count: FINALE_HEARTS,
        }],
        EntryFlag::None => Vec::new(),
    }
}
