//! Grid module - the playing field storage
//!
//! The grid is a `width x height` field where each cell is either blank or a
//! block carrying a color and a decoration tag. Storage is a flat row-major
//! vector; nothing outside this module indexes it directly.
//!
//! Coordinates: (x, y) where x ranges `0..width` (left to right) and y ranges
//! `0..height` (top to bottom). Negative rows are the spawn buffer above the
//! field and never hold blocks.

use crate::types::{Color, Tag, SPAWN_BUFFER_ROWS};

/// A locked block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub color: Color,
    pub tag: Tag,
}

/// Cell on the grid (None = blank)
pub type Cell = Option<Block>;

/// The playing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a blank grid
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid must be at least 1x1");
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.valid_display_location(x, y) {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Write a block into the grid.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid. Callers validate placements
    /// before writing, so an out-of-range write is a logic error.
    pub fn set_color(&mut self, x: i32, y: i32, color: Color, tag: Tag) {
        let Some(idx) = self.index(x, y) else {
            panic!(
                "set_color({}, {}) outside {}x{} grid",
                x, y, self.width, self.height
            );
        };
        self.cells[idx] = Some(Block { color, tag });
    }

    /// Check whether a mino block may sit at (x, y).
    ///
    /// Columns must be inside the grid and rows above the bottom. Rows inside
    /// the grid must be blank. With `must_be_on_board` every row above the grid
    /// is rejected; otherwise the spawn buffer (down to row `-2`) is allowed.
    pub fn valid_block_location(&self, x: i32, y: i32, must_be_on_board: bool) -> bool {
        if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        if must_be_on_board {
            if y < 0 {
                return false;
            }
        } else if y < -SPAWN_BUFFER_ROWS {
            return false;
        }
        if y >= 0 && self.cells[(y as usize) * self.width + (x as usize)].is_some() {
            return false;
        }
        true
    }

    /// Strict in-bounds check, no occupancy test
    pub fn valid_display_location(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Check if a row is completely filled
    pub fn is_full_line(&self, y: usize) -> bool {
        y < self.height && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Row indices of every full line, top to bottom
    pub fn full_lines(&self) -> Vec<usize> {
        (0..self.height).filter(|&y| self.is_full_line(y)).collect()
    }

    /// Remove a row: every row above it moves down by one and the top row
    /// becomes blank. Tags travel with their colors.
    ///
    /// # Panics
    ///
    /// Panics if `y` is not a row of the grid.
    pub fn delete_line(&mut self, y: usize) {
        assert!(
            y < self.height,
            "delete_line({}) outside grid of height {}",
            y,
            self.height
        );
        let width = self.width;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(None);
    }

    /// Iterate over every occupied cell as `(x, y, block)`, row by row
    pub fn blocks(&self) -> impl Iterator<Item = (i32, i32, Block)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|block| ((idx % width) as i32, (idx / width) as i32, block))
        })
    }

    /// Number of occupied cells
    pub fn block_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(color: Color) -> Cell {
        Some(Block { color, tag: 0 })
    }

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(4, 6);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(3, 0), Some(3));
        assert_eq!(grid.index(0, 1), Some(4));
        assert_eq!(grid.index(3, 5), Some(23));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(4, 0), None);
        assert_eq!(grid.index(0, 6), None);
    }

    #[test]
    fn test_set_color_writes_tag() {
        let mut grid = Grid::new(4, 6);
        grid.set_color(2, 5, Color::Red, 3);
        assert_eq!(
            grid.get(2, 5),
            Some(Some(Block {
                color: Color::Red,
                tag: 3
            }))
        );
        assert_eq!(grid.block_count(), 1);
    }

    #[test]
    #[should_panic(expected = "outside 4x6 grid")]
    fn test_set_color_out_of_range_panics() {
        let mut grid = Grid::new(4, 6);
        grid.set_color(0, -1, Color::Red, 0);
    }

    #[test]
    fn test_valid_block_location_spawn_buffer() {
        let grid = Grid::new(4, 6);
        assert!(grid.valid_block_location(0, -1, false));
        assert!(grid.valid_block_location(0, -2, false));
        assert!(!grid.valid_block_location(0, -3, false));
        assert!(!grid.valid_block_location(0, -1, true));
        assert!(grid.valid_block_location(0, 0, true));
    }

    #[test]
    fn test_delete_line_moves_tags_with_colors() {
        let mut grid = Grid::new(2, 3);
        grid.set_color(0, 0, Color::Blue, 1);
        grid.set_color(1, 1, Color::Green, 2);
        grid.set_color(0, 2, Color::Red, 0);
        grid.set_color(1, 2, Color::Red, 0);

        grid.delete_line(2);

        assert_eq!(grid.row(0), &[None, None]);
        assert_eq!(
            grid.row(1),
            &[
                Some(Block {
                    color: Color::Blue,
                    tag: 1
                }),
                None
            ]
        );
        assert_eq!(
            grid.row(2),
            &[
                None,
                Some(Block {
                    color: Color::Green,
                    tag: 2
                })
            ]
        );
    }

    #[test]
    fn test_delete_top_line_only_blanks_it() {
        let mut grid = Grid::new(2, 2);
        grid.set_color(0, 0, Color::Cyan, 0);
        grid.set_color(1, 1, Color::Cyan, 0);
        grid.delete_line(0);
        assert_eq!(grid.row(0), &[None, None]);
        assert_eq!(grid.row(1), &[None, block(Color::Cyan)]);
    }

    #[test]
    fn test_blocks_iterates_in_row_order() {
        let mut grid = Grid::new(3, 2);
        grid.set_color(2, 0, Color::Yellow, 0);
        grid.set_color(0, 1, Color::White, 1);
        let coords: Vec<(i32, i32)> = grid.blocks().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(coords, vec![(2, 0), (0, 1)]);
    }
}
