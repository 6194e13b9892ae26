//! Per-frame input collection for terminal environments.
//!
//! Key presses become actions queued for the next frame. The soft-drop key
//! also sets a "held" flag that speeds up gravity. Terminals often emit no
//! release events, so the flag also drops after a timeout without presses.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;

use crate::types::GameAction;

/// Upper bound of actions collected in one frame; extra presses are dropped.
pub const MAX_ACTIONS_PER_FRAME: usize = 32;

/// Actions collected for one frame.
pub type ActionBatch = ArrayVec<GameAction, MAX_ACTIONS_PER_FRAME>;

// Longer than the usual auto-repeat delay so a held key stays held between
// repeat events.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 600;

/// Queues actions and tracks whether soft drop is held.
#[derive(Debug, Clone)]
pub struct InputHandler {
    pending: ActionBatch,
    down_held: bool,
    last_down_time: Instant,
    key_release_timeout: Duration,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            pending: ArrayVec::new(),
            down_held: false,
            last_down_time: Instant::now(),
            key_release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout = Duration::from_millis(timeout_ms);
        self
    }

    pub fn key_release_timeout(&self) -> Duration {
        self.key_release_timeout
    }

    /// Record a press (or auto-repeat) of a bound key.
    pub fn handle_press(&mut self, action: GameAction) {
        if action == GameAction::SoftDrop {
            self.last_down_time = Instant::now();
            // Repeats only extend the hold; gravity does the fast dropping.
            if self.down_held {
                return;
            }
            self.down_held = true;
        }
        let _ = self.pending.try_push(action);
    }

    pub fn handle_release(&mut self, action: GameAction) {
        if action == GameAction::SoftDrop {
            self.down_held = false;
        }
    }

    /// Hand over the queued actions, oldest first.
    pub fn take_actions(&mut self) -> ActionBatch {
        self.expire_hold();
        std::mem::take(&mut self.pending)
    }

    pub fn is_down_held(&self) -> bool {
        self.down_held && self.last_down_time.elapsed() <= self.key_release_timeout
    }

    fn expire_hold(&mut self) {
        if self.down_held && self.last_down_time.elapsed() > self.key_release_timeout {
            self.down_held = false;
        }
    }

    pub fn reset(&mut self) {
        self.pending.clear();
        self.down_held = false;
        self.last_down_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
