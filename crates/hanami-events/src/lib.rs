//! Event envelope types for hanami
//!
//! Domain events live in `hanami-story`; this crate wraps them with the
//! context the front-end cares about, chiefly which trigger produced them.
//! A timer-driven advance and a key-driven advance carry the same payload
//! but are distinct in the debug log.

use std::time::Instant;

use strum_macros::Display;

pub use hanami_story::events::{InputAction, StoryEvent};

/// What caused an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EventSource {
    /// A discrete user input (key press).
    UserInput,
    /// The auto-play deadline fired.
    Timer,
    /// Startup or other lifecycle activity.
    System,
}

/// A story event plus its provenance.
#[derive(Debug, Clone)]
pub struct EventEnvelope {
    pub event: StoryEvent,
    pub source: EventSource,
    pub timestamp: Instant,
}

impl EventEnvelope {
    pub fn new(event: StoryEvent, source: EventSource) -> Self {
        Self {
            event,
            source,
            timestamp: Instant::now(),
        }
    }

    pub fn user(event: StoryEvent) -> Self {
        Self::new(event, EventSource::UserInput)
    }

    pub fn timer(event: StoryEvent) -> Self {
        Self::new(event, EventSource::Timer)
    }

    pub fn system(event: StoryEvent) -> Self {
        Self::new(event, EventSource::System)
    }
}

/// Wrap a batch of events produced by one trigger.
pub fn envelope_all(events: Vec<StoryEvent>, source: EventSource) -> Vec<EventEnvelope> {
    events
        .into_iter()
        .map(|event| EventEnvelope::new(event, source))
        .collect()
}

/// Consumes envelopes; lets the playback loop stay ignorant of the front-end.
pub trait EventConsumer {
    fn handle_event(&mut self, envelope: EventEnvelope);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_all_preserves_order_and_source() {
        let events = vec![
            StoryEvent::HeartsBurst { count: 10 },
            StoryEvent::RingLift,
        ];
        let envelopes = envelope_all(events, EventSource::Timer);
        assert_eq!(envelopes.len(), 2);
        assert!(envelopes.iter().all(|e| e.source == EventSource::Timer));
        assert_eq!(envelopes[0].event, StoryEvent::HeartsBurst { count: 10 });
        assert_eq!(envelopes[1].event, StoryEvent::RingLift);
    }

    #[test]
    fn source_displays_for_the_log() {
        assert_eq!(EventSource::UserInput.to_string(), "UserInput");
        assert_eq!(EventSource::Timer.to_string(), "Timer");
    }
}
