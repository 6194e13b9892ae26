//! Settings file tests - creation, copy to user file, restore, save

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use rocket_tetris::settings::{Settings, SettingsStore, DEFAULT_FILE, USER_FILE};
use rocket_tetris::types::{ModeConfig, SpecialKind};

static NEXT_DIR: AtomicUsize = AtomicUsize::new(0);

/// Fresh directory per test under the system temp dir.
fn scratch_dir() -> PathBuf {
    let n = NEXT_DIR.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!(
        "rocket-tetris-settings-{}-{}",
        std::process::id(),
        n
    ));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn read_json(path: &std::path::Path) -> serde_json::Value {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_open_creates_both_files() {
    let dir = scratch_dir();
    let store = SettingsStore::open(&dir).unwrap();

    assert!(dir.join(DEFAULT_FILE).is_file());
    assert!(dir.join(USER_FILE).is_file());
    assert_eq!(store.settings(), &Settings::default());
    assert_eq!(
        fs::read_to_string(store.default_path()).unwrap(),
        fs::read_to_string(store.user_path()).unwrap()
    );

    let json = read_json(store.user_path());
    assert_eq!(json["graphics"]["fps"], 25);
    assert_eq!(json["sound"]["play_sounds"], true);
    assert_eq!(json["controls"]["hard_drop"], "space");
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_existing_user_file_is_loaded() {
    let dir = scratch_dir();
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join(USER_FILE),
        r#"{ "sound": { "play_sounds": false }, "controls": { "hard_drop": "enter" } }"#,
    )
    .unwrap();

    let store = SettingsStore::open(&dir).unwrap();
    assert!(!store.settings().sound.play_sounds);
    assert_eq!(store.settings().control("hard_drop"), Some("enter"));
    // Missing sections come from the defaults.
    assert_eq!(store.settings().graphics.board_width, 10);
    // The default file is still written alongside.
    assert!(dir.join(DEFAULT_FILE).is_file());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_corrupt_user_file_is_restored() {
    let dir = scratch_dir();
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(USER_FILE), "{ not json").unwrap();

    let store = SettingsStore::open(&dir).unwrap();
    assert_eq!(store.settings(), &Settings::default());
    let json = read_json(store.user_path());
    assert_eq!(json["controls"]["pause"], "esc");
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_changes_are_saved_to_the_user_file() {
    let dir = scratch_dir();
    let mut store = SettingsStore::open(&dir).unwrap();

    store.set_play_sounds(false).unwrap();
    store.set_control("move_left", " A ").unwrap();
    assert!(store.set_control("hold", "c").is_err());

    let json = read_json(store.user_path());
    assert_eq!(json["sound"]["play_sounds"], false);
    assert_eq!(json["controls"]["move_left"], "a");
    assert!(json["controls"].get("hold").is_none());

    // Defaults stay untouched.
    let defaults = read_json(store.default_path());
    assert_eq!(defaults["sound"]["play_sounds"], true);

    let reopened = SettingsStore::open(&dir).unwrap();
    assert!(!reopened.settings().sound.play_sounds);
    assert_eq!(reopened.settings().control("move_left"), Some("a"));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_restore_from_default_discards_changes() {
    let dir = scratch_dir();
    let mut store = SettingsStore::open(&dir).unwrap();
    store.set_play_sounds(false).unwrap();

    store.restore_from_default().unwrap();
    assert!(store.settings().sound.play_sounds);
    let json = read_json(store.user_path());
    assert_eq!(json["sound"]["play_sounds"], true);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_game_config_from_file() {
    let settings = Settings::from_json(
        r#"{
            "graphics": { "fps": 30, "board_width": 12, "board_height": 24 },
            "gameplay": { "lines_per_level": 5, "level_increment": 0.5, "fast_drop_frames": 3 }
        }"#,
    )
    .unwrap();
    let config = settings.to_game_config(ModeConfig::special(vec![SpecialKind::Rocket]));
    assert_eq!((config.width, config.height, config.fps), (12, 24, 30));
    assert_eq!(config.rules.lines_per_level, 5);
    assert_eq!(config.rules.level_increment, 0.5);
    assert_eq!(config.rules.fast_drop_frames, 3);
    assert_eq!(config.normal_drop_frames(), 15);
    assert_eq!(config.mode.pool().len(), 8);
}
