//! Outward interfaces of the board
//!
//! The board never owns a clock, a score, a screen or an advisor. Whenever a
//! rule needs one of those it calls into a [`BoardEvents`] implementation that
//! the session passes in with every command, and it draws through a
//! [`BlockSink`].

use std::time::Duration;

use crate::types::{Color, MinoLayer, Tag};

/// Calls the board makes into the game loop.
///
/// All calls are synchronous. The board treats each one as finished when it
/// returns; in particular rows are only deleted after
/// [`show_delete_animation`](BoardEvents::show_delete_animation) returns.
pub trait BoardEvents {
    /// Arm, rearm or disarm the gravity/lock timer.
    ///
    /// `Duration::ZERO` means "resume the normal gravity cadence"; any other
    /// value is a lock delay.
    fn reset_timer(&mut self, delay: Duration);

    /// The session is over. The board accepts no further commands.
    fn game_over(&mut self);

    /// Reward for cells dropped instantly by the piece that just locked.
    fn add_score(&mut self, drop_distance: u32);

    /// Number of lines removed by one lock.
    fn add_deleted_lines(&mut self, count: usize);

    /// A new current piece is in play.
    fn refresh_advisor(&mut self) {}

    /// Rows (ascending) about to be deleted. May block while an animation plays.
    fn show_delete_animation(&mut self, rows: &[usize]) {
        let _ = rows;
    }
}

/// Drawing hook for a full redraw.
pub trait BlockSink {
    /// One occupied grid cell. Never called for blank cells.
    fn draw_block(&mut self, x: i32, y: i32, color: Color, tag: Tag);

    /// One block of a live mino. Preview blocks use coordinates relative to
    /// the preview box; current and drop blocks use board coordinates.
    fn draw_mino_block(&mut self, layer: MinoLayer, x: i32, y: i32, color: Color, tag: Tag) {
        let _ = layer;
        self.draw_block(x, y, color, tag);
    }
}
