//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::time::Duration;

use termtris::core::{Board, BoardEvents, Grid, Mino};
use termtris::types::{Facing, MinoKind};

/// Records every call the board makes
#[derive(Debug, Default)]
pub struct Recorder {
    pub timers: Vec<Duration>,
    pub game_overs: usize,
    pub scores: Vec<u32>,
    pub deleted_lines: Vec<usize>,
    pub advisor_refreshes: usize,
    pub animations: Vec<Vec<usize>>,
}

impl BoardEvents for Recorder {
    fn reset_timer(&mut self, delay: Duration) {
        self.timers.push(delay);
    }

    fn game_over(&mut self) {
        self.game_overs += 1;
    }

    fn add_score(&mut self, drop_distance: u32) {
        self.scores.push(drop_distance);
    }

    fn add_deleted_lines(&mut self, count: usize) {
        self.deleted_lines.push(count);
    }

    fn refresh_advisor(&mut self) {
        self.advisor_refreshes += 1;
    }

    fn show_delete_animation(&mut self, rows: &[usize]) {
        self.animations.push(rows.to_vec());
    }
}

pub fn grid(rows: &[&str]) -> Grid {
    Grid::from_debug_rows(rows).expect("fixture grid parses")
}

/// Board on a fixture grid with a T waiting in the preview
pub fn board(rows: &[&str], current: Mino) -> Board {
    let grid = grid(rows);
    let preview = Mino::spawn(MinoKind::T, grid.width());
    Board::from_position(grid, current, preview, 1)
}

pub fn mino(kind: MinoKind, facing: Facing, x: i32, y: i32) -> Mino {
    Mino::new(kind, facing, x, y)
}
