//! Game state module - the game-mode policy over one session
//!
//! Owns the grid, the active and next pieces and the piece factory, and
//! drives them one frame at a time: actions first, then at most one gravity
//! step. Every placement, manual or gravity-driven, goes through the same
//! path: score the cleared rows, count the block, raise the level where the
//! mode allows it, spawn the next piece and check for game over.

use tracing::{debug, info};

use crate::command::{Command, CommandOutcome};
use crate::factory::PieceFactory;
use crate::grid::{Grid, LineClear};
use crate::piece::Piece;
use crate::scoring::{line_clear_score, GravityClock, Level};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{GameAction, GameConfig, STARTING_LEVEL};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    StartUp,
    Playing,
    /// Terminal until an explicit restart.
    GameOver,
}

/// Result of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameOutcome {
    Continue,
    Paused,
    Quit,
    GameOver,
}

/// What one placement did (consumed by observers)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlacementEvent {
    pub lines_cleared: u32,
    /// Scan positions of the cleared rows, bottom first (see [`LineClear`]).
    pub cleared_rows: Vec<usize>,
    /// Columns emptied by a special piece.
    pub wiped_columns: Vec<usize>,
    pub score_gained: u32,
    pub special: bool,
    pub level_ups: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    active: Option<Piece>,
    next: Option<Piece>,
    factory: PieceFactory,
    phase: Phase,
    paused: bool,
    score: u32,
    level: Level,
    blocks_placed: u32,
    total_lines: u32,
    gravity: GravityClock,
    /// Last placement (consumed by observers).
    last_event: Option<PlacementEvent>,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Seed of episode 0; later episodes offset it by their id.
    base_seed: u64,
}

impl GameState {
    /// Create a session in `StartUp` with an empty grid.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::for_episode(config, seed, 0)
    }

    fn for_episode(config: GameConfig, base_seed: u64, episode_id: u32) -> Self {
        let factory = PieceFactory::new(
            &config.mode.pool(),
            config.width,
            base_seed.wrapping_add(episode_id as u64),
        );
        Self {
            grid: Grid::new(config.width, config.height),
            active: None,
            next: None,
            factory,
            phase: Phase::StartUp,
            paused: false,
            score: 0,
            level: Level::new(STARTING_LEVEL),
            blocks_placed: 0,
            total_lines: 0,
            gravity: GravityClock::new(),
            last_event: None,
            episode_id,
            base_seed,
            config,
        }
    }

    /// Spawn the first pieces and enter `Playing`.
    ///
    /// The first active piece is always a standard kind; specials can only
    /// show up from the lookahead onwards.
    pub fn start(&mut self) {
        if self.phase != Phase::StartUp {
            return;
        }
        let first = self.factory.create_standard_piece();
        self.next = Some(self.factory.create_random_piece());
        self.phase = Phase::Playing;
        info!(
            mode = self.config.mode.kind.as_str(),
            episode = self.episode_id,
            seed = self.factory.seed(),
            "session started"
        );
        self.activate(first);
    }

    /// Throw the session away and start a fresh one in the same mode.
    pub fn restart(&mut self) {
        let episode = self.episode_id.wrapping_add(1);
        *self = Self::for_episode(self.config.clone(), self.base_seed, episode);
        info!(episode, "session restarted");
        self.start();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Gravity rate multiplier.
    pub fn level(&self) -> f32 {
        self.level.rate
    }

    pub fn display_level(&self) -> u32 {
        self.level.display
    }

    pub fn total_lines(&self) -> u32 {
        self.total_lines
    }

    pub fn blocks_placed(&self) -> u32 {
        self.blocks_placed
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access for scripted setups.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    /// Replace the active piece (scripted setups). Game over applies as if it
    /// had just spawned.
    pub fn set_active(&mut self, piece: Piece) {
        if self.phase == Phase::Playing {
            self.activate(piece);
        }
    }

    /// Take and clear the last placement event.
    pub fn take_last_event(&mut self) -> Option<PlacementEvent> {
        self.last_event.take()
    }

    /// Apply one action. Returns whether it changed anything.
    ///
    /// Piece actions are ignored while paused or outside `Playing`. `Quit`
    /// is left to [`GameState::frame`] and is a no-op here.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Quit => false,
            GameAction::Pause => {
                if self.phase != Phase::Playing {
                    return false;
                }
                self.paused = !self.paused;
                debug!(paused = self.paused, "pause toggled");
                true
            }
            GameAction::Restart => {
                self.restart();
                true
            }
            _ => {
                if self.phase != Phase::Playing || self.paused {
                    return false;
                }
                let Some(command) = Command::from_action(action) else {
                    return false;
                };
                let Some(piece) = self.active.as_mut() else {
                    return false;
                };
                match command.execute(piece, &mut self.grid) {
                    CommandOutcome::Moved => true,
                    CommandOutcome::Blocked => false,
                    CommandOutcome::Placed(cleared) => {
                        let placed = *piece;
                        self.on_placement(&placed, cleared);
                        true
                    }
                }
            }
        }
    }

    /// Advance the gravity clock by one frame. Returns true when gravity
    /// fired.
    ///
    /// Holding down switches the cadence to the fast-drop threshold. A
    /// failed gravity step freezes the piece.
    pub fn tick(&mut self, down_held: bool) -> bool {
        if self.phase != Phase::Playing || self.paused {
            return false;
        }
        let threshold = if down_held {
            self.config.rules.fast_drop_frames
        } else {
            self.config.normal_drop_frames()
        };
        if !self.gravity.advance(self.level.rate, threshold) {
            return false;
        }
        self.gravity_step();
        true
    }

    fn gravity_step(&mut self) {
        let Some(piece) = self.active.as_mut() else {
            return;
        };
        if piece.soft_drop_step(&self.grid) {
            return;
        }
        let placed = *piece;
        let cleared = self.grid.freeze(&placed);
        self.on_placement(&placed, cleared);
    }

    /// One frame: actions in order, then at most one gravity step.
    ///
    /// `Quit` ends the frame immediately. `Pause` toggles and ends the
    /// frame's processing.
    pub fn frame(&mut self, actions: &[GameAction], down_held: bool) -> FrameOutcome {
        for &action in actions {
            match action {
                GameAction::Quit => return FrameOutcome::Quit,
                GameAction::Pause => {
                    self.apply_action(action);
                    return self.outcome();
                }
                _ => {
                    self.apply_action(action);
                }
            }
            if self.game_over() {
                return FrameOutcome::GameOver;
            }
        }
        self.tick(down_held);
        self.outcome()
    }

    fn outcome(&self) -> FrameOutcome {
        if self.game_over() {
            FrameOutcome::GameOver
        } else if self.paused {
            FrameOutcome::Paused
        } else {
            FrameOutcome::Continue
        }
    }

    fn on_placement(&mut self, placed: &Piece, cleared: LineClear) {
        let lines = cleared.count() as u32;
        let special = placed.is_special();
        let score_gained = if special {
            0
        } else {
            line_clear_score(cleared.count())
        };
        let wiped_columns = if special {
            let (width, _) = placed.frame_size();
            (placed.x()..placed.x() + width as i32)
                .filter(|&x| x >= 0 && (x as usize) < self.grid.width())
                .map(|x| x as usize)
                .collect()
        } else {
            Vec::new()
        };

        self.score += score_gained;
        self.total_lines += lines;
        self.blocks_placed += 1;

        let level_ups = if self.config.mode.has_level_progression() {
            self.level.advance(self.total_lines, &self.config.rules)
        } else {
            0
        };
        if level_ups > 0 {
            info!(
                level = self.level.display,
                rate = self.level.rate,
                "level up"
            );
        }

        debug!(
            kind = placed.kind().as_str(),
            lines,
            score = self.score,
            blocks = self.blocks_placed,
            "piece placed"
        );

        self.last_event = Some(PlacementEvent {
            lines_cleared: lines,
            cleared_rows: cleared.rows,
            wiped_columns,
            score_gained,
            special,
            level_ups,
        });

        self.spawn_next();
    }

    /// Promote the lookahead and draw a new one.
    fn spawn_next(&mut self) {
        let piece = match self.next.take() {
            Some(piece) => piece,
            None => self.factory.create_random_piece(),
        };
        self.next = Some(self.factory.create_random_piece());
        self.activate(piece);
    }

    /// Make `piece` the active one; game over if it intersects at once.
    fn activate(&mut self, piece: Piece) {
        let blocked = self.grid.intersects(&piece);
        self.active = Some(piece);
        if blocked {
            self.phase = Phase::GameOver;
            info!(
                score = self.score,
                lines = self.total_lines,
                blocks = self.blocks_placed,
                "game over"
            );
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            board: self.grid.to_values(),
            active: self.active.as_ref().map(PieceSnapshot::from),
            ghost_y: self
                .active
                .as_ref()
                .filter(|_| self.phase == Phase::Playing)
                .map(|p| p.landing_y(&self.grid)),
            next: self.next.as_ref().map(PieceSnapshot::from),
            score: self.score,
            level: self.level.rate,
            display_level: self.level.display,
            lines: self.total_lines,
            blocks_placed: self.blocks_placed,
            paused: self.paused,
            game_over: self.game_over(),
            mode: self.config.mode.kind,
            episode_id: self.episode_id,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default(), 1)
    }
}
