use crate::script::DialogueEntry;

/// Events emitted by playback for the presentation layer.
///
/// The sequencer never touches the screen; it describes what should happen
/// and the front-end decides how to show it.
#[derive(Debug, Clone, PartialEq)]
pub enum StoryEvent {
    /// A new entry is on display.
    DialogueShown { index: usize, entry: DialogueEntry },
    /// Spawn `count` floating hearts.
    HeartsBurst { count: u32 },
    /// One-shot prop cue: the proposal ring lifts.
    RingLift,
    /// The characters turn toward each other.
    Embrace,
    /// Auto-play was switched on or off.
    AutoPlayToggled { enabled: bool },
    /// The script wrapped past its last entry and restarted.
    Restarted,
}

/// Discrete user intents, decoupled from the key bindings that produce them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Advance,
    ToggleAutoPlay,
    ResetView,
    Pan { dx: i16, dy: i16 },
}
