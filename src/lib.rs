//! termtris (workspace facade crate).
//!
//! Re-exports the member crates under `termtris::{core,engine,input,term,types}`
//! and holds the binary's configuration and logging setup.

pub mod config;
pub mod logging;

pub use termtris_core as core;
pub use termtris_engine as engine;
pub use termtris_input as input;
pub use termtris_term as term;
pub use termtris_types as types;

pub use config::Config;
