use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};

use hanami_events::{envelope_all, EventConsumer, EventEnvelope, EventSource};
use hanami_scene::Scene;
use hanami_story::{HanamiConfig, InputAction, Playback, StoryEvent, StoryScript};

/// Scenery layout seed. Fixed so the grove looks the same every run.
const SCENE_SEED: u64 = 0x6861_6e61;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppView {
    Story,
    Debug,
}

/// One line in the debug event log.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub source: EventSource,
    pub description: String,
}

pub struct App {
    pub should_quit: bool,
    pub current_view: AppView,
    pub playback: Playback,
    pub scene: Scene,
    pub log: VecDeque<LogEntry>,
    pub max_log: usize,
}

impl App {
    pub fn new(config: &HanamiConfig, script: StoryScript, now: Instant) -> Self {
        Self {
            should_quit: false,
            current_view: AppView::Story,
            playback: Playback::new(script, config.autoplay, config.dialogue_interval()),
            scene: Scene::new(SCENE_SEED, config.ambient_hearts, now),
            log: VecDeque::new(),
            max_log: 200,
        }
    }

    /// Show the opening entry and arm auto-play.
    pub fn start(&mut self, now: Instant) {
        let events = self.playback.start(now);
        self.consume(envelope_all(events, EventSource::System));
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char('1') => {
                self.current_view = AppView::Story;
                return;
            }
            KeyCode::Char('2') => {
                self.current_view = AppView::Debug;
                return;
            }
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        if let Some(action) = Self::action_for(&key) {
            self.apply_action(action, now);
        }
    }

    /// Key bindings for the story controls.
    fn action_for(key: &KeyEvent) -> Option<InputAction> {
        match key.code {
            KeyCode::Char(' ') => Some(InputAction::Advance),
            KeyCode::Char('a') | KeyCode::Char('A') => Some(InputAction::ToggleAutoPlay),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(InputAction::ResetView),
            KeyCode::Left => Some(InputAction::Pan { dx: -2, dy: 0 }),
            KeyCode::Right => Some(InputAction::Pan { dx: 2, dy: 0 }),
            KeyCode::Up => Some(InputAction::Pan { dx: 0, dy: -1 }),
            KeyCode::Down => Some(InputAction::Pan { dx: 0, dy: 1 }),
            _ => None,
        }
    }

    pub fn apply_action(&mut self, action: InputAction, now: Instant) {
        match action {
            InputAction::Advance => {
                let events = self.playback.handle_user_advance(now);
                self.consume(envelope_all(events, EventSource::UserInput));
            }
            InputAction::ToggleAutoPlay => {
                let events = self.playback.toggle_auto_play(now);
                self.consume(envelope_all(events, EventSource::UserInput));
            }
            InputAction::ResetView => {
                self.scene.reset_view();
                self.push_log(EventSource::UserInput, "View reset".to_string());
            }
            InputAction::Pan { dx, dy } => {
                self.scene.pan(dx, dy);
            }
        }
    }

    /// Periodic update: fire due playback deadlines and animate the scene.
    pub fn on_tick(&mut self, now: Instant, dt: Duration) {
        let events = self.playback.tick(now);
        self.consume(envelope_all(events, EventSource::Timer));
        self.scene.tick(dt.as_secs_f32(), now);
    }

    fn consume(&mut self, envelopes: Vec<EventEnvelope>) {
        for envelope in envelopes {
            self.handle_event(envelope);
        }
    }

    fn push_log(&mut self, source: EventSource, description: String) {
        self.log.push_back(LogEntry {
            timestamp: chrono::Utc::now(),
            source,
            description,
        });
        if self.log.len() > self.max_log {
            self.log.pop_front();
        }
    }
}

impl EventConsumer for App {
    fn handle_event(&mut self, envelope: EventEnvelope) {
        let now = Instant::now();
        let description = match &envelope.event {
            StoryEvent::DialogueShown { index, entry } => {
                self.scene.show_entry(entry, now);
                format!(
                    "Line {}: {} (chapter {})",
                    index,
                    entry.speaker,
                    entry.chapter()
                )
            }
            StoryEvent::HeartsBurst { count } => {
                self.scene.spawn_hearts(*count);
                format!("Hearts burst x{}", count)
            }
            StoryEvent::RingLift => {
                self.scene.lift_ring(now);
                "The ring lifts".to_string()
            }
            StoryEvent::Embrace => {
                self.scene.embrace();
                "The couple embraces".to_string()
            }
            StoryEvent::AutoPlayToggled { enabled } => {
                format!("Auto-play {}", if *enabled { "on" } else { "off" })
            }
            StoryEvent::Restarted => "Story restarted from the beginning".to_string(),
        };
        self.push_log(envelope.source, description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let now = Instant::now();
        let mut app = App::new(
            &HanamiConfig::default(),
            StoryScript::proposal_story(),
            now,
        );
        app.start(now);
        app
    }

    #[test]
    fn space_advances_the_dialogue() {
        let mut app = app();
        assert_eq!(app.playback.cursor(), 0);
        app.handle_key(key(KeyCode::Char(' ')), Instant::now());
        assert_eq!(app.playback.cursor(), 1);
    }

    #[test]
    fn a_toggles_auto_play_and_logs_it() {
        let mut app = app();
        assert!(app.playback.auto_play());
        app.handle_key(key(KeyCode::Char('a')), Instant::now());
        assert!(!app.playback.auto_play());
        assert!(app
            .log
            .iter()
            .any(|entry| entry.description.contains("Auto-play off")));
    }

    #[test]
    fn number_keys_switch_views_and_q_quits() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('2')), Instant::now());
        assert_eq!(app.current_view, AppView::Debug);
        app.handle_key(key(KeyCode::Char('1')), Instant::now());
        assert_eq!(app.current_view, AppView::Story);
        app.handle_key(key(KeyCode::Char('q')), Instant::now());
        assert!(app.should_quit);
    }

    #[test]
    fn reaching_the_proposal_lifts_the_ring_and_spawns_hearts() {
        let mut app = app();
        let now = Instant::now();
        for _ in 0..9 {
            app.handle_key(key(KeyCode::Char(' ')), now);
        }
        assert_eq!(app.playback.cursor(), 9);
        assert!(app.scene.ring.lifted);
        assert!(app.scene.particles.len() >= 10);
    }

    #[test]
    fn acceptance_brings_the_embrace() {
        let mut app = app();
        let now = Instant::now();
        for _ in 0..10 {
            app.handle_key(key(KeyCode::Char(' ')), now);
        }
        assert!(app.scene.embraced());
    }

    #[test]
    fn reset_view_clears_panning() {
        let mut app = app();
        let now = Instant::now();
        app.handle_key(key(KeyCode::Right), now);
        app.handle_key(key(KeyCode::Right), now);
        assert_ne!(app.scene.view.dx, 0);
        app.handle_key(key(KeyCode::Char('r')), now);
        assert_eq!(app.scene.view.dx, 0);
    }

    #[test]
    fn timer_tick_advances_when_due() {
        let mut app = app();
        let now = Instant::now();
        let period = app.playback.period();
        app.on_tick(now + period, Duration::from_millis(33));
        assert_eq!(app.playback.cursor(), 1);
        assert!(app
            .log
            .iter()
            .any(|entry| entry.source == EventSource::Timer));
    }

    #[test]
    fn log_is_bounded() {
        let mut app = app();
        let now = Instant::now();
        for _ in 0..500 {
            app.handle_key(key(KeyCode::Char(' ')), now);
        }
        assert!(app.log.len() <= app.max_log);
    }
}
