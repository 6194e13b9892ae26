//! Input sources polled once per frame.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};

use crate::handler::{ActionBatch, InputHandler};
use crate::map::KeyBindings;
use crate::types::GameAction;

/// Anything that can feed a frame with actions.
pub trait InputSource {
    /// Actions that arrived since the last call. Never blocks.
    fn get_actions(&mut self) -> io::Result<ActionBatch>;

    /// Whether the soft-drop key is currently held.
    fn is_down_held(&self) -> bool;
}

/// Reads key events from the terminal through crossterm.
#[derive(Debug, Clone)]
pub struct TerminalInput {
    bindings: KeyBindings,
    handler: InputHandler,
}

impl TerminalInput {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            handler: InputHandler::new(),
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Wait up to `timeout` for the first event, then drain whatever else is
    /// already queued.
    pub fn pump(&mut self, timeout: Duration) -> io::Result<()> {
        let mut wait = timeout;
        while event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = self.bindings.map_key(key) {
                    match key.kind {
                        KeyEventKind::Press | KeyEventKind::Repeat => {
                            self.handler.handle_press(action)
                        }
                        KeyEventKind::Release => self.handler.handle_release(action),
                    }
                }
            }
            wait = Duration::ZERO;
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.handler.reset();
    }
}

impl InputSource for TerminalInput {
    fn get_actions(&mut self) -> io::Result<ActionBatch> {
        self.pump(Duration::ZERO)?;
        Ok(self.handler.take_actions())
    }

    fn is_down_held(&self) -> bool {
        self.handler.is_down_held()
    }
}

/// Pre-recorded frames, for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<(Vec<GameAction>, bool)>,
    down_held: bool,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one frame's actions and down-key state.
    pub fn push_frame(&mut self, actions: &[GameAction], down_held: bool) {
        self.frames.push_back((actions.to_vec(), down_held));
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    /// Once the script runs out every frame is empty with the key released.
    fn get_actions(&mut self) -> io::Result<ActionBatch> {
        let mut batch = ActionBatch::new();
        match self.frames.pop_front() {
            Some((actions, down_held)) => {
                self.down_held = down_held;
                for action in actions {
                    let _ = batch.try_push(action);
                }
            }
            None => self.down_held = false,
        }
        Ok(batch)
    }

    fn is_down_held(&self) -> bool {
        self.down_held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_frames_play_back_in_order() {
        let mut input = ScriptedInput::new();
        input.push_frame(&[GameAction::MoveLeft], false);
        input.push_frame(&[], true);

        assert_eq!(
            input.get_actions().unwrap().as_slice(),
            &[GameAction::MoveLeft]
        );
        assert!(!input.is_down_held());
        assert!(input.get_actions().unwrap().is_empty());
        assert!(input.is_down_held());
        assert_eq!(input.remaining(), 0);
        assert!(input.get_actions().unwrap().is_empty());
        assert!(!input.is_down_held());
    }
}
