//! Rocket Tetris (workspace facade crate).
//!
//! Re-exports the member crates under one roof so the binary, the
//! integration tests and the benchmarks can use
//! `rocket_tetris::{core,input,settings,term,types}`.

pub use rocket_tetris_core as core;
pub use rocket_tetris_input as input;
pub use rocket_tetris_settings as settings;
pub use rocket_tetris_term as term;
pub use rocket_tetris_types as types;
