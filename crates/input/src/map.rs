//! Key mapping from terminal events to game actions.
//!
//! Bindings come from the settings file as `action name -> key name` pairs.
//! Key names are lowercase: arrow names (`left`, `up`, ...), `space`, `esc`,
//! `enter`, `tab`, `backspace`, `f1`..`f12`, or a single character.

use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::GameAction;

/// Parse a key name into a key code.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let lower = name.trim().to_lowercase();
    let code = match lower.as_str() {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "space" => KeyCode::Char(' '),
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        other => {
            if let Some(n) = other.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                if (1..=12).contains(&n) {
                    return Some(KeyCode::F(n));
                }
                return None;
            }
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    Some(code)
}

/// Display name of a key code (inverse of [`parse_key`] where possible).
pub fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::F(n) => format!("f{}", n),
        KeyCode::Char(c) => c.to_lowercase().to_string(),
        other => format!("{:?}", other).to_lowercase(),
    }
}

/// A binding that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    UnknownAction(String),
    UnknownKey(String),
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::UnknownAction(name) => write!(f, "unknown action '{}'", name),
            BindingError::UnknownKey(name) => write!(f, "unknown key '{}'", name),
        }
    }
}

impl std::error::Error for BindingError {}

/// Key-to-action table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    bindings: Vec<(KeyCode, GameAction)>,
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind `key` to `action`, replacing whatever `key` did before.
    pub fn bind(&mut self, action: GameAction, key: KeyCode) {
        let key = normalize(key);
        self.bindings.retain(|(k, _)| *k != key);
        self.bindings.push((key, action));
    }

    /// Bind by names as they appear in the settings file.
    pub fn bind_named(&mut self, action: &str, key: &str) -> Result<(), BindingError> {
        let action = GameAction::from_str(action)
            .ok_or_else(|| BindingError::UnknownAction(action.to_string()))?;
        let code = parse_key(key).ok_or_else(|| BindingError::UnknownKey(key.to_string()))?;
        self.bind(action, code);
        Ok(())
    }

    /// Build from `(action name, key name)` pairs, stopping at the first bad one.
    pub fn from_named<'a, I>(pairs: I) -> Result<Self, BindingError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut bindings = Self::empty();
        for (action, key) in pairs {
            bindings.bind_named(action, key)?;
        }
        Ok(bindings)
    }

    /// Action for a key event. Ctrl-C always quits.
    pub fn map_key(&self, key: KeyEvent) -> Option<GameAction> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(GameAction::Quit);
        }
        let code = normalize(key.code);
        self.bindings
            .iter()
            .find(|(k, _)| *k == code)
            .map(|(_, action)| *action)
    }

    /// First key bound to `action`.
    pub fn key_for(&self, action: GameAction) -> Option<KeyCode> {
        self.bindings
            .iter()
            .find(|(_, a)| *a == action)
            .map(|(k, _)| *k)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        for (action, key) in [
            (GameAction::MoveLeft, KeyCode::Left),
            (GameAction::MoveRight, KeyCode::Right),
            (GameAction::SoftDrop, KeyCode::Down),
            (GameAction::HardDrop, KeyCode::Char(' ')),
            (GameAction::RotateCw, KeyCode::Up),
            (GameAction::RotateCcw, KeyCode::Char('z')),
            (GameAction::Quit, KeyCode::Char('q')),
            (GameAction::Pause, KeyCode::Esc),
            (GameAction::Restart, KeyCode::Char('r')),
        ] {
            bindings.bind(action, key);
        }
        bindings
    }
}

/// Letters match regardless of case.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
