//! Scoring module - classic line-clear points, levels and gravity
//!
//! Points for a clear are `LINE_SCORES[n] * (level + 1)`. A clear of more than
//! four lines (possible on tall custom presets) scores as one four-line clear
//! per group of four plus the remainder. The drop reward is the hard-drop
//! distance the board reports when a piece locks.

use termtris_types::{DROP_INTERVALS, LINES_PER_LEVEL, LINE_SCORES};

/// Calculate line clear score
/// lines: number of lines cleared at once
/// level: current level (0-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    let tetrises = (lines / 4) as u32;
    let base = tetrises
        .saturating_mul(LINE_SCORES[4])
        .saturating_add(LINE_SCORES[lines % 4]);
    base.saturating_mul(level + 1)
}

/// Level management
/// Level increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL
}

/// Get drop interval for a level (in milliseconds); the last entry applies
/// to every higher level
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let index = (level as usize).min(DROP_INTERVALS.len() - 1);
    DROP_INTERVALS[index]
}

/// Running score, cleared lines and level of one game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    score: u32,
    lines: u32,
    level: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Gravity interval at the current level
    pub fn drop_interval_ms(&self) -> u32 {
        get_drop_interval_ms(self.level)
    }

    /// Reward a locked piece with its hard-drop distance
    pub fn add_drop(&mut self, distance: u32) {
        self.score = self.score.saturating_add(distance);
    }

    /// Score a line clear at the level it happened on, then level up
    pub fn add_lines(&mut self, count: usize) {
        self.score = self
            .score
            .saturating_add(calculate_line_score(count, self.level));
        self.lines = self.lines.saturating_add(count as u32);
        self.level = calculate_level(self.lines);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
