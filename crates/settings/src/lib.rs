//! Settings file: a default JSON file plus a user copy.
//!
//! On open, `<dir>/default_settings.json` is written if missing and copied
//! to `<dir>/user_settings.json` if that is missing. The user file is what
//! gets loaded and saved. A user file that cannot be read or parsed is
//! restored from the defaults instead of failing.
//!
//! ```json
//! {
//!   "graphics": { "fps": 25, "board_width": 10, "board_height": 20 },
//!   "sound": { "play_sounds": true },
//!   "controls": { "move_left": "left", "hard_drop": "space", "...": "..." },
//!   "gameplay": { "lines_per_level": 10, "level_increment": 0.25, "fast_drop_frames": 5 }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub use rocket_tetris_types as types;

use crate::types::{
    GameAction, GameConfig, LevelRules, ModeConfig, BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_FPS,
    FAST_DROP_FRAMES, FRAME_SIZE, LEVEL_INCREMENT, LINES_PER_LEVEL, ROCKET_HEIGHT,
};

/// Environment variable naming the settings directory.
pub const CONFIG_DIR_ENV: &str = "ROCKET_TETRIS_CONFIG_DIR";
pub const DEFAULT_CONFIG_DIR: &str = "config";
pub const DEFAULT_FILE: &str = "default_settings.json";
pub const USER_FILE: &str = "user_settings.json";

/// Largest board side accepted from the file.
pub const MAX_BOARD_SIZE: usize = 100;

/// Smallest positive level increment accepted from the file.
pub const MIN_LEVEL_INCREMENT: f32 = 0.01;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsSettings {
    pub fps: u32,
    pub board_width: usize,
    pub board_height: usize,
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundSettings {
    pub play_sounds: bool,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self { play_sounds: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    pub lines_per_level: u32,
    pub level_increment: f32,
    pub fast_drop_frames: u32,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            lines_per_level: LINES_PER_LEVEL,
            level_increment: LEVEL_INCREMENT,
            fast_drop_frames: FAST_DROP_FRAMES,
        }
    }
}

/// Default `action name -> key name` table.
pub fn default_controls() -> BTreeMap<String, String> {
    [
        ("move_left", "left"),
        ("move_right", "right"),
        ("soft_drop", "down"),
        ("hard_drop", "space"),
        ("rotate", "up"),
        ("rotate_ccw", "z"),
        ("quit", "q"),
        ("pause", "esc"),
        ("restart", "r"),
    ]
    .into_iter()
    .map(|(a, k)| (a.to_string(), k.to_string()))
    .collect()
}

/// Everything stored in the settings file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub graphics: GraphicsSettings,
    pub sound: SoundSettings,
    /// Action name to key name.
    pub controls: BTreeMap<String, String>,
    pub gameplay: GameplaySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            graphics: GraphicsSettings::default(),
            sound: SoundSettings::default(),
            controls: default_controls(),
            gameplay: GameplaySettings::default(),
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("invalid settings JSON")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize settings")
    }

    pub fn control(&self, action: &str) -> Option<&str> {
        self.controls.get(action).map(String::as_str)
    }

    /// `(action name, key name)` pairs in a stable order.
    pub fn control_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.controls.iter().map(|(a, k)| (a.as_str(), k.as_str()))
    }

    /// Engine configuration for `mode`.
    ///
    /// The board is kept between one frame wide (one rocket tall) and
    /// [`MAX_BOARD_SIZE`] cells per side, and the frame rate at least 1. A
    /// positive level increment is raised to [`MIN_LEVEL_INCREMENT`]; zero
    /// or less turns levelling off, and a non-finite value means the default.
    pub fn to_game_config(&self, mode: ModeConfig) -> GameConfig {
        GameConfig {
            width: self.graphics.board_width.clamp(FRAME_SIZE, MAX_BOARD_SIZE),
            height: self.graphics.board_height.clamp(ROCKET_HEIGHT, MAX_BOARD_SIZE),
            fps: self.graphics.fps.max(1),
            mode,
            rules: LevelRules {
                lines_per_level: self.gameplay.lines_per_level,
                level_increment: level_increment(self.gameplay.level_increment),
                fast_drop_frames: self.gameplay.fast_drop_frames.max(1),
            },
        }
    }
}

fn level_increment(value: f32) -> f32 {
    if !value.is_finite() {
        LEVEL_INCREMENT
    } else if value <= 0.0 {
        0.0
    } else {
        value.max(MIN_LEVEL_INCREMENT)
    }
}

/// Settings directory: explicit path, else `$ROCKET_TETRIS_CONFIG_DIR`, else
/// `./config`.
pub fn resolve_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    std::env::var(CONFIG_DIR_ENV)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR))
}

/// The settings files of one directory and the loaded user settings.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    default_path: PathBuf,
    user_path: PathBuf,
    settings: Settings,
}

impl SettingsStore {
    /// Create the files as needed and load the user settings.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        let mut store = Self {
            default_path: dir.join(DEFAULT_FILE),
            user_path: dir.join(USER_FILE),
            settings: Settings::default(),
        };

        if !store.default_path.exists() {
            store.write_default()?;
        }
        if !store.user_path.exists() {
            store.copy_default_to_user()?;
        }

        store.settings = match store.read_user() {
            Ok(settings) => settings,
            Err(err) => {
                warn!(
                    path = %store.user_path.display(),
                    error = %err,
                    "user settings unreadable, restoring defaults"
                );
                store.restore_from_default()?;
                store.read_user()?
            }
        };
        Ok(store)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn user_path(&self) -> &Path {
        &self.user_path
    }

    pub fn default_path(&self) -> &Path {
        &self.default_path
    }

    /// Write the current settings to the user file.
    pub fn save(&self) -> Result<()> {
        let text = self.settings.to_json()?;
        fs::write(&self.user_path, text)
            .with_context(|| format!("Failed to write {}", self.user_path.display()))
    }

    pub fn set_play_sounds(&mut self, play: bool) -> Result<()> {
        self.settings.sound.play_sounds = play;
        self.save()
    }

    /// Rebind `action` (a settings action name such as `hard_drop`) and save.
    pub fn set_control(&mut self, action: &str, key: &str) -> Result<()> {
        if GameAction::from_str(action).is_none() {
            bail!("unknown action '{}'", action);
        }
        self.settings
            .controls
            .insert(action.to_string(), key.trim().to_lowercase());
        self.save()
    }

    /// Rewrite the default file and copy it over the user file.
    pub fn restore_from_default(&mut self) -> Result<()> {
        self.write_default()?;
        self.copy_default_to_user()?;
        self.settings = Settings::default();
        Ok(())
    }

    fn write_default(&self) -> Result<()> {
        let text = Settings::default().to_json()?;
        fs::write(&self.default_path, text)
            .with_context(|| format!("Failed to write {}", self.default_path.display()))?;
        info!(path = %self.default_path.display(), "wrote default settings");
        Ok(())
    }

    fn copy_default_to_user(&self) -> Result<()> {
        fs::copy(&self.default_path, &self.user_path).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                self.default_path.display(),
                self.user_path.display()
            )
        })?;
        Ok(())
    }

    fn read_user(&self) -> Result<Settings> {
        let text = fs::read_to_string(&self.user_path)
            .with_context(|| format!("Failed to read {}", self.user_path.display()))?;
        Settings::from_json(&text)
            .with_context(|| format!("Failed to parse {}", self.user_path.display()))
    }
}
