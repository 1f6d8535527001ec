//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Key repeat
//! is left to the terminal: every press or auto-repeat is one action.

pub mod map;

pub use termtris_types as types;

pub use map::{handle_key_event, should_quit};
