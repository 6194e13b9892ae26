//! Terminal runner (default binary).
//!
//! Loads the settings file, builds the engine configuration for the chosen
//! mode and runs the frame loop: read input, resolve actions and one gravity
//! step, render. Logs go to a file because the terminal is in raw mode.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use rocket_tetris::core::{FrameOutcome, GameState};
use rocket_tetris::input::{InputSource, KeyBindings, TerminalInput};
use rocket_tetris::settings::{default_controls, resolve_dir, Settings, SettingsStore};
use rocket_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use rocket_tetris::types::{ModeConfig, SpecialKind};

/// Environment variable naming the log file.
const LOG_ENV: &str = "ROCKET_TETRIS_LOG";

/// Frames the cleared-row and wiped-column flash stays on screen.
const FLASH_FRAMES: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Classic,
    Special,
}

#[derive(Debug, Parser)]
#[command(name = "rocket-tetris", version, about = "Falling-block puzzle game with a column-wiping rocket")]
struct Cli {
    /// Game mode
    #[arg(long, value_enum, default_value_t = Mode::Classic)]
    mode: Mode,

    /// Special piece to enable in special mode (repeatable; defaults to rocket)
    #[arg(long = "special", value_parser = parse_special)]
    specials: Vec<SpecialKind>,

    /// Special mode without the seven standard pieces
    #[arg(long)]
    no_classic: bool,

    /// Seed for the piece sequence (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding default_settings.json and user_settings.json
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log: Option<PathBuf>,
}

fn parse_special(s: &str) -> Result<SpecialKind, String> {
    SpecialKind::from_str(s).ok_or_else(|| format!("unknown special piece '{}'", s))
}

impl Cli {
    fn mode_config(&self) -> ModeConfig {
        match self.mode {
            Mode::Classic => ModeConfig::classic(),
            Mode::Special => {
                let specials = if self.specials.is_empty() {
                    SpecialKind::ALL.to_vec()
                } else {
                    self.specials.clone()
                };
                ModeConfig {
                    include_classic: !self.no_classic,
                    ..ModeConfig::special(specials)
                }
            }
        }
    }
}

fn init_logging(path: Option<PathBuf>) -> Result<()> {
    let path = path.or_else(|| {
        std::env::var(LOG_ENV)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    });
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

/// Defaults overlaid with the file's bindings.
fn key_bindings(settings: &Settings) -> KeyBindings {
    let mut controls = default_controls();
    controls.extend(settings.controls.clone());
    let mut bindings = KeyBindings::empty();
    for (action, key) in &controls {
        if let Err(err) = bindings.bind_named(action, key) {
            warn!(%err, action = action.as_str(), "ignoring control binding");
        }
    }
    bindings
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.clone())?;

    let dir = resolve_dir(cli.config_dir.as_deref());
    let store = SettingsStore::open(&dir)
        .with_context(|| format!("Failed to open settings in {}", dir.display()))?;
    let settings = store.settings().clone();

    let config = settings.to_game_config(cli.mode_config());
    let seed = cli.seed.unwrap_or_else(clock_seed);
    info!(?config, seed, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, GameState::new(config, seed), &settings);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut game: GameState, settings: &Settings) -> Result<()> {
    game.start();

    let view = GameView::default();
    let mut input = TerminalInput::new(key_bindings(settings));
    let mut fb = FrameBuffer::new(0, 0);
    let frame_duration = Duration::from_secs(1) / game.config().fps;
    let mut flash = None;
    let mut flash_frames = 0;

    loop {
        let frame_start = Instant::now();

        let actions = input.get_actions().context("failed to read input")?;
        let outcome = game.frame(&actions, input.is_down_held());
        if outcome == FrameOutcome::Quit {
            info!(score = game.score(), "quit");
            return Ok(());
        }

        if let Some(event) = game.take_last_event() {
            let noisy = event.lines_cleared > 0 || event.special;
            if noisy && settings.sound.play_sounds {
                term.bell()?;
            }
            if noisy {
                flash = Some(event);
                flash_frames = FLASH_FRAMES;
            }
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game.snapshot(), flash.as_ref(), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        if flash_frames > 0 {
            flash_frames -= 1;
            if flash_frames == 0 {
                flash = None;
            }
        }

        // Sleep until the next frame while still collecting key events.
        let deadline = frame_start + frame_duration;
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            input.pump(deadline - now).context("failed to read input")?;
        }
    }
}
