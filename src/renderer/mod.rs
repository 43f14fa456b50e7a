//! Terminal rendering module
//!
//! The scene is rasterised into a low-resolution [`Canvas`] and written out
//! with half-block characters, two canvas rows per terminal row.

pub mod canvas;
pub mod scene;
pub mod terminal;

use std::io;

use crate::sim::Game;

pub use canvas::Canvas;
pub use terminal::TerminalRenderer;

/// Something that can show the current game state
pub trait Presenter {
    fn present(&mut self, game: &Game, now: f64) -> io::Result<()>;
}
