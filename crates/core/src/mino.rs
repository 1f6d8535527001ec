//! Mino module - falling piece shapes and transforms
//!
//! Every kind is described by its North cells inside a square box. Other
//! facings are derived by turning the box a quarter at a time, so a mino's
//! cells always stay inside the same `size x size` box anchored at `(x, y)`.
//!
//! Transforms never mutate: `moved_*` and `rotated_*` return a new candidate
//! that the caller validates before committing.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{Color, Facing, MinoKind, SPAWN_Y};

/// Offset of a single block relative to the mino anchor
pub type BlockOffset = (i32, i32);

/// The four block offsets of a mino
pub type MinoCells = ArrayVec<BlockOffset, 4>;

/// North cells and box size for a kind
fn north_shape(kind: MinoKind) -> ([BlockOffset; 4], i32) {
    match kind {
        MinoKind::I => ([(0, 1), (1, 1), (2, 1), (3, 1)], 4),
        MinoKind::J => ([(0, 0), (0, 1), (1, 1), (2, 1)], 3),
        MinoKind::L => ([(2, 0), (0, 1), (1, 1), (2, 1)], 3),
        MinoKind::O => ([(0, 0), (1, 0), (0, 1), (1, 1)], 2),
        MinoKind::S => ([(1, 0), (2, 0), (0, 1), (1, 1)], 3),
        MinoKind::T => ([(1, 0), (0, 1), (1, 1), (2, 1)], 3),
        MinoKind::Z => ([(0, 0), (1, 0), (1, 1), (2, 1)], 3),
    }
}

/// Block offsets of `kind` turned to `facing`
pub fn shape(kind: MinoKind, facing: Facing) -> MinoCells {
    let (north, size) = north_shape(kind);
    north
        .iter()
        .map(|&(x, y)| {
            let (mut x, mut y) = (x, y);
            for _ in 0..facing.index() {
                // quarter turn clockwise inside the box
                (x, y) = (size - 1 - y, x);
            }
            (x, y)
        })
        .collect()
}

/// A falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mino {
    kind: MinoKind,
    facing: Facing,
    x: i32,
    y: i32,
}

impl Mino {
    pub fn new(kind: MinoKind, facing: Facing, x: i32, y: i32) -> Self {
        Self { kind, facing, x, y }
    }

    /// Create a North-facing mino centered above a grid of `grid_width`
    pub fn spawn(kind: MinoKind, grid_width: usize) -> Self {
        let size = Self::box_size_of(kind);
        let x = grid_width as i32 / 2 - (size + 1) / 2;
        Self::new(kind, Facing::North, x, SPAWN_Y)
    }

    fn box_size_of(kind: MinoKind) -> i32 {
        north_shape(kind).1
    }

    pub fn kind(&self) -> MinoKind {
        self.kind
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Side length of the square box the shape turns in
    pub fn box_size(&self) -> i32 {
        Self::box_size_of(self.kind)
    }

    /// Number of rows from the anchor down to the lowest block
    pub fn height(&self) -> i32 {
        self.offsets().iter().map(|&(_, dy)| dy + 1).max().unwrap_or(0)
    }

    /// Block offsets relative to the anchor
    pub fn offsets(&self) -> MinoCells {
        shape(self.kind, self.facing)
    }

    /// Board cells covered by this mino
    pub fn cells(&self) -> MinoCells {
        self.offsets()
            .into_iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    /// Color of this mino at a board cell, if it covers it
    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        self.cells().contains(&(x, y)).then_some(self.color())
    }

    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    #[must_use]
    pub fn moved_left(&self) -> Self {
        self.translated(-1, 0)
    }

    #[must_use]
    pub fn moved_right(&self) -> Self {
        self.translated(1, 0)
    }

    #[must_use]
    pub fn moved_down(&self) -> Self {
        self.translated(0, 1)
    }

    #[must_use]
    pub fn moved_up(&self) -> Self {
        self.translated(0, -1)
    }

    #[must_use]
    pub fn rotated_cw(&self) -> Self {
        Self {
            facing: self.facing.rotate_cw(),
            ..*self
        }
    }

    #[must_use]
    pub fn rotated_ccw(&self) -> Self {
        Self {
            facing: self.facing.rotate_ccw(),
            ..*self
        }
    }

    /// Check every block against the grid
    pub fn is_valid(&self, grid: &Grid, must_be_on_board: bool) -> bool {
        self.cells()
            .iter()
            .all(|&(x, y)| grid.valid_block_location(x, y, must_be_on_board))
    }

    /// Burn this mino into the grid, tagging each block with the facing.
    ///
    /// # Panics
    ///
    /// Panics if any block lies outside the grid; callers check
    /// `is_valid(grid, true)` first.
    pub fn set_on_board(&self, grid: &mut Grid) {
        let color = self.color();
        let tag = self.facing.index();
        for (x, y) in self.cells() {
            grid.set_color(x, y, color, tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t_shapes() {
        assert_eq!(
            shape(MinoKind::T, Facing::North).as_slice(),
            &[(1, 0), (0, 1), (1, 1), (2, 1)]
        );
        let mut east = shape(MinoKind::T, Facing::East);
        east.sort();
        assert_eq!(east.as_slice(), &[(1, 0), (1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_o_shape_is_rotation_invariant() {
        let mut north = shape(MinoKind::O, Facing::North);
        north.sort();
        for facing in [Facing::East, Facing::South, Facing::West] {
            let mut turned = shape(MinoKind::O, facing);
            turned.sort();
            assert_eq!(turned, north);
        }
    }

    #[test]
    fn test_shapes_stay_inside_box() {
        for kind in MinoKind::ALL {
            let size = Mino::box_size_of(kind);
            for facing in [Facing::North, Facing::East, Facing::South, Facing::West] {
                for (x, y) in shape(kind, facing) {
                    assert!((0..size).contains(&x) && (0..size).contains(&y));
                }
            }
        }
    }

    #[test]
    fn test_spawn_is_centered() {
        let t = Mino::spawn(MinoKind::T, 10);
        assert_eq!((t.x(), t.y()), (3, SPAWN_Y));
        let o = Mino::spawn(MinoKind::O, 10);
        assert_eq!(o.x(), 4);
        let i = Mino::spawn(MinoKind::I, 10);
        assert_eq!(i.x(), 3);
    }

    #[test]
    fn test_transforms_leave_source_untouched() {
        let mino = Mino::new(MinoKind::L, Facing::North, 2, 3);
        let moved = mino.moved_left().moved_down();
        let rotated = mino.rotated_ccw();
        assert_eq!((mino.x(), mino.y(), mino.facing()), (2, 3, Facing::North));
        assert_eq!((moved.x(), moved.y()), (1, 4));
        assert_eq!(rotated.facing(), Facing::West);
        assert_eq!(mino.moved_up().y(), 2);
    }

    #[test]
    fn test_height_counts_to_lowest_block() {
        assert_eq!(Mino::new(MinoKind::O, Facing::North, 0, 0).height(), 2);
        assert_eq!(Mino::new(MinoKind::I, Facing::North, 0, 0).height(), 2);
        assert_eq!(Mino::new(MinoKind::I, Facing::East, 0, 0).height(), 4);
    }

    #[test]
    fn test_set_on_board_tags_with_facing() {
        let mut grid = Grid::new(4, 4);
        let mino = Mino::new(MinoKind::O, Facing::South, 1, 2);
        mino.set_on_board(&mut grid);
        assert_eq!(grid.block_count(), 4);
        let block = grid.get(1, 2).flatten().expect("block");
        assert_eq!(block.color, Color::Yellow);
        assert_eq!(block.tag, 2);
    }
}
