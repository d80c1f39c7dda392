use std::time::{Duration, Instant};

use crate::numbers;

/// Throttles host frames down to logical ticks. The delay between ticks comes
/// from a speed table indexed by the current level.
#[derive(Debug, Clone)]
pub struct GameClock {
    speeds: Vec<Duration>,
    level: usize,
    last_tick: Option<Instant>,
}

impl GameClock {
    pub fn new(speeds: &[u64], level: i64) -> Self {
        let mut clock = GameClock {
            speeds: speeds.iter().map(|ms| Duration::from_millis(*ms)).collect(),
            level: 0,
            last_tick: None,
        };
        clock.set_level(level);
        clock
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Out of range levels are clamped to the table.
    pub fn set_level(&mut self, level: i64) -> usize {
        let max = self.speeds.len().saturating_sub(1) as i64;
        self.level = numbers::clamp(level, 0, max) as usize;
        self.level
    }

    pub fn delay(&self) -> Duration {
        self.speeds.get(self.level).copied().unwrap_or_default()
    }

    /// True when a logical update is due at `now`. The first frame only
    /// starts the clock.
    pub fn poll(&mut self, now: Instant) -> bool {
        let start = *self.last_tick.get_or_insert(now);
        if now < start + self.delay() {
            return false;
        }
        self.last_tick = Some(now);
        true
    }

    pub fn reset(&mut self) {
        self.last_tick = None;
    }
}
