//! Scoring module - line points, level progression and the gravity clock
//!
//! Points depend only on how many rows one placement cleared; the level
//! never enters the score. The level is a gravity-rate multiplier: every
//! frame adds it to the gravity accumulator.

use crate::types::{LevelRules, LINE_SCORES};

/// Points for clearing `lines` rows with one placement (0 for 0 or more
/// than 4 rows).
pub fn line_clear_score(lines: usize) -> u32 {
    match lines {
        1..=4 => LINE_SCORES[lines - 1],
        _ => 0,
    }
}

/// Level state of a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Level {
    /// Gravity rate multiplier.
    pub rate: f32,
    /// Integer level shown to the player, starting at 1.
    pub display: u32,
}

impl Level {
    pub fn new(rate: f32) -> Self {
        Self { rate, display: 1 }
    }

    /// Raise the level while `total_lines / rate` reaches `lines_per_level`.
    ///
    /// Returns how many level-ups happened. A non-positive increment never
    /// raises the level, and neither does one too small to change `rate`.
    pub fn advance(&mut self, total_lines: u32, rules: &LevelRules) -> u32 {
        if rules.level_increment.is_nan() || rules.level_increment <= 0.0 || rules.lines_per_level == 0 {
            return 0;
        }
        let mut gained = 0;
        while total_lines as f32 / self.rate >= rules.lines_per_level as f32 {
            let next = self.rate + rules.level_increment;
            if next <= self.rate {
                break;
            }
            self.rate = next;
            self.display += 1;
            gained += 1;
        }
        gained
    }
}

/// Frame-driven gravity accumulator
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GravityClock {
    counter: f32,
}

impl GravityClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one frame weighted by `rate`. Returns true when gravity fires,
    /// which resets the clock.
    pub fn advance(&mut self, rate: f32, threshold: u32) -> bool {
        self.counter += rate;
        if self.counter >= threshold as f32 {
            self.counter = 0.0;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.counter = 0.0;
    }

    pub fn counter(&self) -> f32 {
        self.counter
    }
}
