//! Core game logic - the falling-block rules
//!
//! This crate owns the playing grid, the current and preview minos, move and
//! rotation legality, lock timing and line clears. It has **no** dependency on
//! a clock, a terminal or an input device:
//!
//! - **Timers** are requested, never awaited: the board asks its
//!   [`BoardEvents`] collaborator to arm a lock delay or resume gravity.
//! - **Score, animation and game over** are reported through the same trait.
//! - **Drawing** goes through a [`BlockSink`].
//!
//! # Module Structure
//!
//! - [`grid`]: cell storage, the two-mode placement check, line scanning
//! - [`mino`]: shapes and non-mutating transforms
//! - [`board`]: movement/rotation controller and lock & line-clear engine
//! - [`preset`]: starting grid templates and the preset catalog
//! - [`events`]: outward interfaces
//! - [`rng`]: seeded 7-bag mino source
//! - [`debug`]: text dump used by tests and preset files
//!
//! # Rules
//!
//! - **Wall kicks**: a blocked rotation is retried one cell left, then one
//!   cell right of the rotated position
//! - **Lock delay**: 300ms once the piece rests on a surface; moving off the
//!   surface cancels it
//! - **Spawn buffer**: two rows above the grid where falling pieces may
//!   overhang; locking there ends the game
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use termtris_core::{Board, BoardEvents, PresetCatalog};
//!
//! #[derive(Default)]
//! struct Tally {
//!     lines: usize,
//!     over: bool,
//! }
//!
//! impl BoardEvents for Tally {
//!     fn reset_timer(&mut self, _delay: Duration) {}
//!     fn game_over(&mut self) {
//!         self.over = true;
//!     }
//!     fn add_score(&mut self, _drop_distance: u32) {}
//!     fn add_deleted_lines(&mut self, count: usize) {
//!         self.lines += count;
//!     }
//! }
//!
//! let mut board = Board::new(PresetCatalog::builtin(), 12345);
//! let mut tally = Tally::default();
//!
//! board.mino_move_left(&mut tally);
//! board.mino_rotate_right(&mut tally);
//! board.mino_drop(&mut tally);
//! assert!(board.drop_distance() > 0);
//!
//! // the next gravity step locks the piece
//! board.mino_move_down(&mut tally);
//! assert_eq!(board.drop_distance(), 0);
//! assert!(!tally.over);
//! ```

pub mod board;
pub mod debug;
pub mod events;
pub mod grid;
pub mod mino;
pub mod preset;
pub mod rng;

pub use termtris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, LockState};
pub use events::{BlockSink, BoardEvents};
pub use grid::{Block, Cell, Grid};
pub use mino::{shape, Mino};
pub use preset::{builtin_presets, load_presets, presets_from_json, BoardPreset, PresetCatalog};
pub use rng::{MinoBag, SimpleRng};
