//! Shared types module - pure data structures and gameplay constants
//!
//! Everything here is plain data with no external dependencies, so it can be
//! used by the engine, the terminal renderer, the input layer and the settings
//! loader alike.
//!
//! # Board
//!
//! The default playfield is 10 columns by 20 rows. Rows are numbered from the
//! top (row 0) to the bottom (row `height - 1`), columns from the left. Board
//! dimensions are fixed for a session but configurable through [`GameConfig`].
//!
//! # Cells
//!
//! | Value | Meaning |
//! |-------|---------|
//! | `0` | empty |
//! | `1..PALETTE_LEN` | occupied, value is the color id |
//! | `-1` | transient marker written while a special piece resolves |
//!
//! # Gravity and levels
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FPS` | 25 | Frames per second of the game loop |
//! | `FAST_DROP_FRAMES` | 5 | Gravity cadence while the down key is held |
//! | `STARTING_LEVEL` | 1.0 | Gravity rate multiplier at session start |
//! | `LEVEL_INCREMENT` | 0.25 | Added to the level on every level-up |
//! | `LINES_PER_LEVEL` | 10 | Lines (relative to level) needed per level-up |
//!
//! # Examples
//!
//! ```
//! use rocket_tetris_types::{Cell, GameAction, PieceKind, PoolKind, SpecialKind};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(
//!     PoolKind::from_str("rocket"),
//!     Some(PoolKind::Special(SpecialKind::Rocket))
//! );
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(Cell::Filled(3).value(), 3);
//! assert_eq!(Cell::Marker.value(), -1);
//! ```

/// Default board width in cells.
pub const BOARD_WIDTH: usize = 10;

/// Default board height in cells.
pub const BOARD_HEIGHT: usize = 20;

/// Side length of the square frame standard rotation states are defined in.
pub const FRAME_SIZE: usize = 4;

/// Default game loop rate.
pub const DEFAULT_FPS: u32 = 25;

/// Gravity cadence (in level-weighted frames) while the down key is held.
pub const FAST_DROP_FRAMES: u32 = 5;

/// Level a session starts at.
pub const STARTING_LEVEL: f32 = 1.0;

/// Fractional level increase applied on each level-up.
pub const LEVEL_INCREMENT: f32 = 0.25;

/// Cleared lines per level, measured relative to the current level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Number of palette entries, including the empty entry at index 0.
pub const PALETTE_LEN: u8 = 7;

/// Points for clearing 1, 2, 3 or 4 rows with a single placement.
///
/// Indexed by `rows_cleared - 1`.
pub const LINE_SCORES: [u32; 4] = [40, 100, 300, 1200];

/// Rocket footprint width in cells.
pub const ROCKET_WIDTH: usize = 3;

/// Rocket footprint height in cells.
pub const ROCKET_HEIGHT: usize = 6;

/// Nominal spawn interval of the rocket (every Nth block).
pub const ROCKET_INTERVAL: u32 = 15;

/// Color index into the palette. `0` is reserved for empty cells.
pub type ColorId = u8;

/// The seven standard tetromino kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All standard kinds in pool order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
        PieceKind::O,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Non-standard pieces with an area-clear ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpecialKind {
    /// 3x6 column bomb: wipes every column it lands in.
    Rocket,
}

impl SpecialKind {
    pub const ALL: [SpecialKind; 1] = [SpecialKind::Rocket];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rocket" => Some(SpecialKind::Rocket),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialKind::Rocket => "rocket",
        }
    }

    /// Full (visual) footprint as `(width, height)`.
    pub fn footprint(&self) -> (usize, usize) {
        match self {
            SpecialKind::Rocket => (ROCKET_WIDTH, ROCKET_HEIGHT),
        }
    }

    /// Nominal spawn interval (every Nth block).
    pub fn interval(&self) -> u32 {
        match self {
            SpecialKind::Rocket => ROCKET_INTERVAL,
        }
    }
}

/// Identifier of one entry in a game mode's piece pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PoolKind {
    Standard(PieceKind),
    Special(SpecialKind),
}

impl PoolKind {
    /// Parse a pool identifier: a tetromino letter or a special kind name.
    pub fn from_str(s: &str) -> Option<Self> {
        PieceKind::from_str(s)
            .map(PoolKind::Standard)
            .or_else(|| SpecialKind::from_str(s).map(PoolKind::Special))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PoolKind::Standard(kind) => kind.as_str(),
            PoolKind::Special(kind) => kind.as_str(),
        }
    }

    pub fn is_special(&self) -> bool {
        matches!(self, PoolKind::Special(_))
    }
}

/// Discrete input actions
///
/// Produced by the input collaborator once per frame and consumed by the
/// game-mode policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Advance to the next rotation state
    RotateCw,
    /// Go back to the previous rotation state
    RotateCcw,
    /// Move piece one row down if possible
    SoftDrop,
    /// Drop to the lowest legal row and freeze
    HardDrop,
    /// Toggle pause
    Pause,
    /// Leave the game loop
    Quit,
    /// Start a fresh session in the same mode
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive, camelCase or snake_case)
    ///
    /// # Examples
    ///
    /// ```
    /// use rocket_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("move_left"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "").as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotate" | "rotatecw" | "rotateclockwise" => Some(GameAction::RotateCw),
            "rotateccw" | "rotatecounterclockwise" => Some(GameAction::RotateCcw),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "pause" => Some(GameAction::Pause),
            "quit" => Some(GameAction::Quit),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Pause => "pause",
            GameAction::Quit => "quit",
            GameAction::Restart => "restart",
        }
    }
}

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Settled block with its color id (always `>= 1`).
    Filled(ColorId),
    /// Transient marker used while a special piece resolves.
    Marker,
}

impl Cell {
    /// Numeric cell value: `0` empty, color id when filled, `-1` for the marker.
    pub fn value(&self) -> i8 {
        match *self {
            Cell::Empty => 0,
            Cell::Filled(color) => color as i8,
            Cell::Marker => -1,
        }
    }

    /// Inverse of [`Cell::value`]. Returns `None` for values outside the palette.
    pub fn from_value(value: i8) -> Option<Self> {
        match value {
            0 => Some(Cell::Empty),
            -1 => Some(Cell::Marker),
            v if v > 0 && (v as u8) < PALETTE_LEN => Some(Cell::Filled(v as u8)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// True for settled blocks (value > 0). Markers do not block movement.
    pub fn is_occupied(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// Game mode family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModeKind {
    #[default]
    Classic,
    Special,
}

impl ModeKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(ModeKind::Classic),
            "special" => Some(ModeKind::Special),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeKind::Classic => "classic",
            ModeKind::Special => "special",
        }
    }
}

/// Which pieces a mode may spawn and whether it levels up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeConfig {
    pub kind: ModeKind,
    pub special_pieces: Vec<SpecialKind>,
    /// Include the seven standard kinds in special mode (always true for classic).
    pub include_classic: bool,
}

impl ModeConfig {
    pub fn classic() -> Self {
        Self {
            kind: ModeKind::Classic,
            special_pieces: Vec::new(),
            include_classic: true,
        }
    }

    pub fn special(special_pieces: Vec<SpecialKind>) -> Self {
        Self {
            kind: ModeKind::Special,
            special_pieces,
            include_classic: true,
        }
    }

    /// Allowed pool in stable order: standard kinds first, then specials.
    ///
    /// ```
    /// use rocket_tetris_types::{ModeConfig, PoolKind, SpecialKind};
    ///
    /// let pool = ModeConfig::special(vec![SpecialKind::Rocket]).pool();
    /// assert_eq!(pool.len(), 8);
    /// assert_eq!(pool[7], PoolKind::Special(SpecialKind::Rocket));
    /// ```
    pub fn pool(&self) -> Vec<PoolKind> {
        let mut pool = Vec::with_capacity(PieceKind::ALL.len() + self.special_pieces.len());
        if self.kind == ModeKind::Classic || self.include_classic {
            pool.extend(PieceKind::ALL.iter().copied().map(PoolKind::Standard));
        }
        if self.kind == ModeKind::Special {
            for kind in &self.special_pieces {
                let entry = PoolKind::Special(*kind);
                if !pool.contains(&entry) {
                    pool.push(entry);
                }
            }
        }
        pool
    }

    /// Only special mode raises the level.
    pub fn has_level_progression(&self) -> bool {
        self.kind == ModeKind::Special
    }
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self::classic()
    }
}

/// Level progression and gravity cadence knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelRules {
    pub lines_per_level: u32,
    pub level_increment: f32,
    pub fast_drop_frames: u32,
}

impl Default for LevelRules {
    fn default() -> Self {
        Self {
            lines_per_level: LINES_PER_LEVEL,
            level_increment: LEVEL_INCREMENT,
            fast_drop_frames: FAST_DROP_FRAMES,
        }
    }
}

/// Everything the engine needs to set up a session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub fps: u32,
    pub mode: ModeConfig,
    pub rules: LevelRules,
}

impl GameConfig {
    pub fn with_mode(mut self, mode: ModeConfig) -> Self {
        self.mode = mode;
        self
    }

    /// Gravity cadence without the down key held: half a second of frames.
    pub fn normal_drop_frames(&self) -> u32 {
        (self.fps / 2).max(1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            fps: DEFAULT_FPS,
            mode: ModeConfig::default(),
            rules: LevelRules::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gameplay_defaults() {
        assert_eq!(BOARD_WIDTH, 10);
        assert_eq!(BOARD_HEIGHT, 20);
        assert_eq!(DEFAULT_FPS, 25);
        assert_eq!(FAST_DROP_FRAMES, 5);
        assert_eq!(LINE_SCORES, [40, 100, 300, 1200]);
        assert_eq!(SpecialKind::Rocket.footprint(), (3, 6));
        assert_eq!(SpecialKind::Rocket.interval(), 15);
    }

    #[test]
    fn cell_values_round_trip_through_the_numeric_encoding() {
        for cell in [Cell::Empty, Cell::Marker, Cell::Filled(1), Cell::Filled(6)] {
            assert_eq!(Cell::from_value(cell.value()), Some(cell));
        }
        assert_eq!(Cell::from_value(PALETTE_LEN as i8), None);
        assert_eq!(Cell::from_value(-2), None);
    }

    #[test]
    fn markers_are_not_occupied() {
        assert!(!Cell::Marker.is_occupied());
        assert!(!Cell::Marker.is_empty());
        assert!(Cell::Filled(2).is_occupied());
    }

    #[test]
    fn classic_pool_ignores_special_pieces() {
        let mut mode = ModeConfig::classic();
        mode.special_pieces.push(SpecialKind::Rocket);
        assert_eq!(mode.pool().len(), 7);
        assert!(mode.pool().iter().all(|k| !k.is_special()));
        assert!(!mode.has_level_progression());
    }

    #[test]
    fn special_pool_without_classic_pieces() {
        let mut mode = ModeConfig::special(vec![SpecialKind::Rocket, SpecialKind::Rocket]);
        mode.include_classic = false;
        assert_eq!(mode.pool(), vec![PoolKind::Special(SpecialKind::Rocket)]);
        assert!(mode.has_level_progression());
    }

    #[test]
    fn normal_drop_cadence_is_half_a_second() {
        let config = GameConfig::default();
        assert_eq!(config.normal_drop_frames(), 12);
        let slow = GameConfig { fps: 1, ..GameConfig::default() };
        assert_eq!(slow.normal_drop_frames(), 1);
    }
}
