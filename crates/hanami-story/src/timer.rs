use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Handle to a scheduled deadline. Ids are allocated in scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
enum Schedule {
    /// Fires once and is removed.
    Once { fire_at: Instant },
    /// Fires repeatedly at an interval.
    Every {
        interval: Duration,
        next_fire: Instant,
    },
}

#[derive(Debug, Clone)]
struct Deadline<T> {
    tag: T,
    schedule: Schedule,
}

/// Deadline records ticked from the main loop.
///
/// Timers here are plain records checked by `tick`, not detached tasks, so
/// every callback runs on the one cooperative loop and cancellation is the
/// removal of a record. `T` is a caller-chosen tag carried back on fire.
pub struct Timers<T> {
    deadlines: HashMap<TimerId, Deadline<T>>,
    next_id: u64,
}

impl<T: Copy> Timers<T> {
    pub fn new() -> Self {
        Self {
            deadlines: HashMap::new(),
            next_id: 0,
        }
    }

    /// Schedule a one-shot deadline `delay` after `now`.
    pub fn schedule_once(&mut self, delay: Duration, tag: T, now: Instant) -> TimerId {
        self.insert(
            tag,
            Schedule::Once {
                fire_at: now + delay,
            },
        )
    }

    /// Schedule a recurring deadline every `interval` starting `interval` after `now`.
    pub fn schedule_every(&mut self, interval: Duration, tag: T, now: Instant) -> TimerId {
        self.insert(
            tag,
            Schedule::Every {
                interval,
                next_fire: now + interval,
            },
        )
    }

    fn insert(&mut self, tag: T, schedule: Schedule) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.deadlines.insert(id, Deadline { tag, schedule });
        id
    }

    /// Cancel a deadline. Cancelling an absent or already-fired one-shot is a
    /// no-op and returns false.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.deadlines.remove(&id).is_some()
    }

    /// Fire every deadline that is due at `now`, in scheduling order.
    /// One-shots are removed; recurring deadlines are pushed one interval out.
    pub fn tick(&mut self, now: Instant) -> Vec<(TimerId, T)> {
        let mut fired = Vec::new();
        let mut expired = Vec::new();

        for (id, deadline) in self.deadlines.iter_mut() {
            match &mut deadline.schedule {
                Schedule::Once { fire_at } => {
                    if now >= *fire_at {
                        fired.push((*id, deadline.tag));
                        expired.push(*id);
                    }
                }
                Schedule::Every {
                    interval,
                    next_fire,
                } => {
                    if now >= *next_fire {
                        fired.push((*id, deadline.tag));
                        *next_fire = now + *interval;
                    }
                }
            }
        }

        for id in expired {
            self.deadlines.remove(&id);
        }

        fired.sort_by_key(|(id, _)| *id);
        fired
    }

    pub fn active_count(&self) -> usize {
        self.deadlines.len()
    }
}

impl<T: Copy> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}
