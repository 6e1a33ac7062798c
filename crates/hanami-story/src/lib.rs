pub mod config;
pub mod events;
pub mod paths;
pub mod script;
pub mod sequencer;
pub mod timer;

pub use config::HanamiConfig;
pub use events::{InputAction, StoryEvent};
pub use script::{DialogueEntry, EntryFlag, Speaker, StoryScript};
pub use sequencer::{Playback, Sequencer};
pub use timer::{TimerId, Timers};
