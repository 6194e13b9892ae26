//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::GameAction`] through
//! configurable bindings and collects them per frame. The engine only sees
//! the [`InputSource`] trait: a batch of actions and whether soft drop is
//! held.

pub mod handler;
pub mod map;
pub mod source;

pub use rocket_tetris_types as types;

pub use handler::{ActionBatch, InputHandler, MAX_ACTIONS_PER_FRAME};
pub use map::{key_name, parse_key, BindingError, KeyBindings};
pub use source::{InputSource, ScriptedInput, TerminalInput};
