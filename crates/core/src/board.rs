//! Board module - the controller and lock engine
//!
//! The board owns the grid, the current and preview minos, the drop distance
//! and the preset catalog. Player commands and gravity steps arrive as method
//! calls; every effect the rules have on the outside world (timers, score,
//! animation, game over) goes out through the [`BoardEvents`] passed in.
//!
//! # Lock states
//!
//! The lock state is not stored. It follows from the piece position and the
//! timer requests the board issues:
//!
//! - **Falling**: the piece can still move down. Gravity steps arrive on the
//!   normal cadence (`reset_timer(Duration::ZERO)`).
//! - **Lock pending**: a committed move left the piece resting on a surface;
//!   the board asked for a [`LOCK_DELAY`] timer. A move that lifts the piece
//!   off the surface cancels it with a zero-delay reset.
//! - **Locked**: the next gravity step fails, so the piece is burned into the
//!   grid, full lines are cleared and the preview is promoted.
//!
//! Every transform is built as a full candidate and only committed after it
//! validates, so a rejected command never changes the board.

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::events::{BlockSink, BoardEvents};
use crate::grid::Grid;
use crate::mino::Mino;
use crate::preset::{BoardPreset, PresetCatalog};
use crate::rng::MinoBag;
use crate::types::{MinoLayer, LOCK_DELAY};

/// Derived lock state of the current piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Falling,
    LockPending,
}

/// The game board aggregate
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    current: Mino,
    preview: Mino,
    drop_distance: u32,
    presets: PresetCatalog,
    bag: MinoBag,
    over: bool,
}

impl Board {
    /// Create a board on the catalog's selected preset
    pub fn new(presets: PresetCatalog, seed: u32) -> Self {
        let mut bag = MinoBag::new(seed);
        let width = presets.current().width();
        let preview = Mino::spawn(bag.draw(), width);
        let current = Mino::spawn(bag.draw(), width);
        Self {
            grid: presets.current().template().clone(),
            current,
            preview,
            drop_distance: 0,
            presets,
            bag,
            over: false,
        }
    }

    /// Create a board in a given position. The grid also becomes the board's
    /// only preset.
    pub fn from_position(grid: Grid, current: Mino, preview: Mino, seed: u32) -> Self {
        let presets = PresetCatalog::single(BoardPreset::new("Custom", grid.clone()));
        Self {
            grid,
            current,
            preview,
            drop_distance: 0,
            presets,
            bag: MinoBag::new(seed),
            over: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn current(&self) -> &Mino {
        &self.current
    }

    pub fn preview(&self) -> &Mino {
        &self.preview
    }

    pub fn drop_distance(&self) -> u32 {
        self.drop_distance
    }

    pub fn presets(&self) -> &PresetCatalog {
        &self.presets
    }

    pub fn preset_index(&self) -> usize {
        self.presets.index()
    }

    pub fn preset_name(&self) -> &str {
        self.presets.current().name()
    }

    /// Whether game over has been reported
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Whether the current piece rests on the floor or the stack
    pub fn is_resting(&self) -> bool {
        !self.current.moved_down().is_valid(&self.grid, false)
    }

    pub fn lock_state(&self) -> LockState {
        if self.is_resting() {
            LockState::LockPending
        } else {
            LockState::Falling
        }
    }

    /// Reset the grid from the selected preset and deal fresh minos
    pub fn clear(&mut self) {
        let preset = self.presets.current();
        self.grid = preset.template().clone();
        self.preview = Mino::spawn(self.bag.draw(), preset.width());
        self.current = Mino::spawn(self.bag.draw(), preset.width());
        self.drop_distance = 0;
        self.over = false;
        debug!(
            preset = preset.name(),
            width = preset.width(),
            height = preset.height(),
            "board reset"
        );
    }

    /// Switch to the previous preset (wrapping) and reset
    pub fn previous_preset(&mut self) {
        self.presets.previous();
        self.clear();
    }

    /// Switch to the next preset (wrapping) and reset
    pub fn next_preset(&mut self) {
        self.presets.next();
        self.clear();
    }

    fn accepts_commands(&self, command: &str) -> bool {
        if self.over {
            warn!(command, "command ignored after game over");
        }
        !self.over
    }

    pub fn mino_move_left(&mut self, events: &mut dyn BoardEvents) {
        if !self.accepts_commands("move_left") {
            return;
        }
        self.drop_distance = 0;
        let mino = self.current.moved_left();
        if mino.is_valid(&self.grid, false) {
            self.commit(mino, events);
        }
    }

    pub fn mino_move_right(&mut self, events: &mut dyn BoardEvents) {
        if !self.accepts_commands("move_right") {
            return;
        }
        self.drop_distance = 0;
        let mino = self.current.moved_right();
        if mino.is_valid(&self.grid, false) {
            self.commit(mino, events);
        }
    }

    /// Rotate clockwise with wall kicks
    pub fn mino_rotate_right(&mut self, events: &mut dyn BoardEvents) {
        if !self.accepts_commands("rotate_right") {
            return;
        }
        let rotated = self.current.rotated_cw();
        self.rotate_with_kicks(rotated, events);
    }

    /// Rotate counter-clockwise with wall kicks
    pub fn mino_rotate_left(&mut self, events: &mut dyn BoardEvents) {
        if !self.accepts_commands("rotate_left") {
            return;
        }
        let rotated = self.current.rotated_ccw();
        self.rotate_with_kicks(rotated, events);
    }

    /// Probe the rotated mino in place, one cell left, then one cell right.
    fn rotate_with_kicks(&mut self, rotated: Mino, events: &mut dyn BoardEvents) {
        self.drop_distance = 0;
        let probes = [rotated, rotated.moved_left(), rotated.moved_right()];
        match probes
            .iter()
            .position(|probe| probe.is_valid(&self.grid, false))
        {
            Some(kick) => {
                trace!(kick, facing = probes[kick].facing().as_str(), "rotated");
                self.commit(probes[kick], events);
            }
            None => trace!("rotation blocked"),
        }
    }

    /// Install a validated lateral/rotational candidate and update the lock
    /// timer.
    fn commit(&mut self, mino: Mino, events: &mut dyn BoardEvents) {
        let was_resting = self.is_resting();
        self.current = mino;
        if !self.start_lock_delay_if_bottom(events) && was_resting {
            // lifted off the surface: cancel the pending lock
            events.reset_timer(Duration::ZERO);
        }
    }

    /// Gravity step or soft drop.
    ///
    /// When the piece cannot descend it locks, unless it still overhangs the
    /// top of the grid, which ends the game.
    pub fn mino_move_down(&mut self, events: &mut dyn BoardEvents) {
        if !self.accepts_commands("move_down") {
            return;
        }
        let mino = self.current.moved_down();
        if mino.is_valid(&self.grid, false) {
            self.drop_distance = 0;
            self.current = mino;
            if !self.start_lock_delay_if_bottom(events) {
                events.reset_timer(Duration::ZERO);
            }
            return;
        }
        if !self.current.is_valid(&self.grid, true) {
            self.report_game_over(events);
            return;
        }
        self.next_mino(events);
    }

    /// Hard drop: descend as far as possible in one step
    pub fn mino_drop(&mut self, events: &mut dyn BoardEvents) {
        if !self.accepts_commands("drop") {
            return;
        }
        self.drop_distance = 0;
        let mut probe = self.current.moved_down();
        while probe.is_valid(&self.grid, false) {
            self.drop_distance += 1;
            probe = probe.moved_down();
        }
        self.current = self.current.translated(0, self.drop_distance as i32);
        if !self.current.is_valid(&self.grid, true) {
            self.report_game_over(events);
            return;
        }
        if self.drop_distance < 1 {
            return;
        }
        if !self.start_lock_delay_if_bottom(events) {
            events.reset_timer(Duration::ZERO);
        }
    }

    /// Arm the lock delay if the piece rests on a surface. Returns whether it
    /// did.
    pub fn start_lock_delay_if_bottom(&self, events: &mut dyn BoardEvents) -> bool {
        if !self.is_resting() {
            return false;
        }
        events.reset_timer(LOCK_DELAY);
        true
    }

    /// Lock the current piece and promote the preview
    fn next_mino(&mut self, events: &mut dyn BoardEvents) {
        events.add_score(self.drop_distance);
        self.drop_distance = 0;

        self.current.set_on_board(&mut self.grid);
        debug!(
            kind = self.current.kind().as_str(),
            x = self.current.x(),
            y = self.current.y(),
            "mino locked"
        );

        self.delete_check(events);

        if !self.preview.is_valid(&self.grid, false) {
            self.preview = self.preview.moved_up();
            if !self.preview.is_valid(&self.grid, false) {
                self.report_game_over(events);
                return;
            }
        }

        self.current = self.preview;
        self.preview = Mino::spawn(self.bag.draw(), self.grid.width());
        events.refresh_advisor();
        events.reset_timer(Duration::ZERO);
    }

    /// Remove every full line, top to bottom. Locking runs this; it is also
    /// safe to call on its own.
    pub fn delete_check(&mut self, events: &mut dyn BoardEvents) {
        let lines = self.grid.full_lines();
        if lines.is_empty() {
            return;
        }

        events.show_delete_animation(&lines);
        for &line in &lines {
            self.grid.delete_line(line);
        }

        debug!(count = lines.len(), rows = ?lines, "lines deleted");
        events.add_deleted_lines(lines.len());
    }

    fn report_game_over(&mut self, events: &mut dyn BoardEvents) {
        self.over = true;
        debug!(preset = self.preset_name(), "game over");
        events.game_over();
    }

    /// Landing position of the current piece, if it can still move down
    pub fn drop_mino(&self) -> Option<Mino> {
        let mut mino = self.current.moved_down();
        if !mino.is_valid(&self.grid, false) {
            return None;
        }
        while mino.is_valid(&self.grid, false) {
            mino = mino.moved_down();
        }
        Some(mino.moved_up())
    }

    /// Draw every occupied grid cell
    pub fn draw_board(&self, sink: &mut dyn BlockSink) {
        for (x, y, block) in self.grid.blocks() {
            sink.draw_block(x, y, block.color, block.tag);
        }
    }

    /// Draw the preview mino in its own box coordinates
    pub fn draw_preview_mino(&self, sink: &mut dyn BlockSink) {
        let tag = self.preview.facing().index();
        for (x, y) in self.preview.offsets() {
            sink.draw_mino_block(MinoLayer::Preview, x, y, self.preview.color(), tag);
        }
    }

    /// Draw the visible cells of the current mino
    pub fn draw_current_mino(&self, sink: &mut dyn BlockSink) {
        self.draw_on_board(&self.current, MinoLayer::Current, sink);
    }

    /// Draw the landing position of the current mino
    pub fn draw_drop_mino(&self, sink: &mut dyn BlockSink) {
        if let Some(mino) = self.drop_mino() {
            self.draw_on_board(&mino, MinoLayer::Drop, sink);
        }
    }

    fn draw_on_board(&self, mino: &Mino, layer: MinoLayer, sink: &mut dyn BlockSink) {
        let tag = mino.facing().index();
        for (x, y) in mino.cells() {
            if self.grid.valid_display_location(x, y) {
                sink.draw_mino_block(layer, x, y, mino.color(), tag);
            }
        }
    }

    /// Grid dump without the current piece
    pub fn debug_board(&self) -> Vec<String> {
        self.grid.debug_rows()
    }

    /// Grid dump with the current piece overlaid in lowercase
    pub fn debug_board_with_current(&self) -> Vec<String> {
        self.grid.debug_rows_with_mino(&self.current)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(PresetCatalog::builtin(), 1)
    }
}
