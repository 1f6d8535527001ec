//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders
//! into a plain framebuffer that is then flushed to the terminal, instead of
//! going through a widget toolkit.
//!
//! - [`GameView`] paints an engine into a [`FrameBuffer`] (pure, testable)
//! - [`TerminalRenderer`] flushes frames with crossterm, diffing against the
//!   previous one
//! - [`LineFlash`] plays the line-clear flash directly on the terminal

pub mod fb;
pub mod flash;
pub mod game_view;
pub mod renderer;

pub use termtris_core as core;
pub use termtris_engine as engine;
pub use termtris_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use flash::{FlashHandle, LineFlash};
pub use game_view::{BoardLayout, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
