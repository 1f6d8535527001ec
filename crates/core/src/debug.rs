//! Text dump of a grid
//!
//! One string per row, one character per column: `.` for blank cells and the
//! color's uppercase symbol (`B C G M R W Y`) for blocks. The overlay variant
//! prints a mino's own cells in lowercase on top of whatever the grid holds.
//!
//! The same format parses back into a grid, which makes it the fixture format
//! for scenario tests and the row format of preset files.

use anyhow::{bail, ensure, Result};

use crate::grid::{Cell, Grid};
use crate::mino::Mino;
use crate::types::{Color, Tag};

/// Symbol of a blank cell
pub const BLANK: char = '.';

fn cell_symbol(cell: Cell) -> char {
    match cell {
        None => BLANK,
        Some(block) => block.color.symbol(),
    }
}

impl Grid {
    /// Rows of the grid as text
    pub fn debug_rows(&self) -> Vec<String> {
        (0..self.height() as i32)
            .map(|y| {
                (0..self.width() as i32)
                    .map(|x| cell_symbol(self.get(x, y).flatten()))
                    .collect()
            })
            .collect()
    }

    /// Rows of the grid as text with `mino` drawn over it in lowercase
    pub fn debug_rows_with_mino(&self, mino: &Mino) -> Vec<String> {
        (0..self.height() as i32)
            .map(|y| {
                (0..self.width() as i32)
                    .map(|x| match mino.color_at(x, y) {
                        Some(color) => color.symbol().to_ascii_lowercase(),
                        None => cell_symbol(self.get(x, y).flatten()),
                    })
                    .collect()
            })
            .collect()
    }

    /// Build a grid from text rows. Every block gets tag 0.
    pub fn from_debug_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        Self::from_debug_rows_with_tags(rows, None)
    }

    /// Build a grid from text rows and an optional tag matrix of the same
    /// shape (`tags[y][x]`).
    pub fn from_debug_rows_with_tags<S: AsRef<str>>(
        rows: &[S],
        tags: Option<&[Vec<Tag>]>,
    ) -> Result<Self> {
        ensure!(!rows.is_empty(), "grid needs at least one row");
        let width = rows[0].as_ref().chars().count();
        ensure!(width > 0, "grid needs at least one column");
        if let Some(tags) = tags {
            ensure!(
                tags.len() == rows.len(),
                "tag matrix has {} rows, expected {}",
                tags.len(),
                rows.len()
            );
        }

        let mut grid = Grid::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            ensure!(
                row.chars().count() == width,
                "row {} is {} wide, expected {}",
                y,
                row.chars().count(),
                width
            );
            let row_tags = tags.map(|t| &t[y]);
            if let Some(row_tags) = row_tags {
                ensure!(
                    row_tags.len() == width,
                    "tag row {} is {} wide, expected {}",
                    y,
                    row_tags.len(),
                    width
                );
            }
            for (x, ch) in row.chars().enumerate() {
                if ch == BLANK {
                    continue;
                }
                let Some(color) = Color::from_symbol(ch) else {
                    bail!("row {} column {}: unknown cell symbol {:?}", y, x, ch);
                };
                let tag = row_tags.map_or(0, |t| t[x]);
                grid.set_color(x as i32, y as i32, color, tag);
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Facing, MinoKind};

    #[test]
    fn test_dump_parses_back() {
        let rows = ["....", ".B..", "CGMR", "WY.."];
        let grid = Grid::from_debug_rows(&rows).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.debug_rows(), rows);
    }

    #[test]
    fn test_overlay_uses_lowercase_and_wins() {
        let grid = Grid::from_debug_rows(&["...", "...", "RRR"]).unwrap();
        // O mino covering (1,1),(2,1),(1,2),(2,2) - overlapping the red row
        let mino = Mino::new(MinoKind::O, Facing::North, 1, 1);
        assert_eq!(grid.debug_rows_with_mino(&mino), ["...", ".yy", "Ryy"]);
    }

    #[test]
    fn test_overlay_ignores_cells_above_grid() {
        let grid = Grid::new(4, 2);
        let mino = Mino::new(MinoKind::I, Facing::North, 0, -1);
        assert_eq!(grid.debug_rows_with_mino(&mino), ["cccc", "...."]);
    }

    #[test]
    fn test_parse_rejects_bad_rows() {
        assert!(Grid::from_debug_rows::<&str>(&[]).is_err());
        assert!(Grid::from_debug_rows(&["..", "..."]).is_err());
        let err = Grid::from_debug_rows(&["..", ".x"]).unwrap_err();
        assert!(err.to_string().contains("row 1 column 1"));
    }

    #[test]
    fn test_parse_with_tags() {
        let tags = vec![vec![0, 3], vec![1, 0]];
        let grid = Grid::from_debug_rows_with_tags(&[".B", "G."], Some(tags.as_slice())).unwrap();
        assert_eq!(grid.get(1, 0).flatten().map(|b| b.tag), Some(3));
        assert_eq!(grid.get(0, 1).flatten().map(|b| b.tag), Some(1));

        let short = vec![vec![0]];
        assert!(Grid::from_debug_rows_with_tags(&[".B", "G."], Some(short.as_slice())).is_err());
    }
}
