//! Falling-brick puzzle engine: bricks, board, scoring, persistence and audio.
//!
//! The engine is headless; the `tetris` binary draws it with macroquad.

pub mod audio;
pub mod board;
pub mod brick;
pub mod error;
pub mod game;
pub mod generator;
pub mod grid;
pub mod input;
pub mod score;
pub mod settings;

pub use error::{Error, Result};
