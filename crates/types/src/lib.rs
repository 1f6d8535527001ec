//! Shared types module - data structures and constants used by every crate
//!
//! Everything here is plain data with no external dependencies, so the same
//! definitions serve the core rules, the engine loop, the terminal view and the
//! key map.
//!
//! # Coordinates
//!
//! Boards are addressed as `(x, y)` with `x` growing to the right and `y`
//! growing downwards. Row 0 is the top visible row. Rows `-1` and `-2` form the
//! spawn buffer above the visible grid: pieces may overhang into it while
//! falling, but may never lock there.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame/poll interval of the terminal loop |
//! | `LOCK_DELAY_MS` | 300 | Grace period once a piece rests on a surface |
//! | `LINE_FLASH_MS` | 60 | Duration of one line-clear flash frame |
//! | `DROP_INTERVALS` | 1000..160 | Gravity interval per level |
//!
//! # Examples
//!
//! ```
//! use termtris_types::{Color, Facing, MinoKind};
//!
//! assert_eq!(MinoKind::T.color(), Color::Magenta);
//! assert_eq!(Color::Magenta.symbol(), 'M');
//! assert_eq!(Facing::North.rotate_cw(), Facing::East);
//! assert_eq!(MinoKind::from_str("z"), Some(MinoKind::Z));
//! ```

use std::time::Duration;

/// Default board width in cells
pub const BOARD_WIDTH: usize = 10;

/// Default board height in cells
pub const BOARD_HEIGHT: usize = 20;

/// Rows above the visible grid a falling piece may occupy
pub const SPAWN_BUFFER_ROWS: i32 = 2;

/// Row a freshly spawned mino is anchored at
pub const SPAWN_Y: i32 = -1;

/// Frame/poll interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Lock delay once a piece rests on a surface (300ms)
pub const LOCK_DELAY_MS: u32 = 300;

/// Lock delay as a [`Duration`], the unit the core speaks in.
pub const LOCK_DELAY: Duration = Duration::from_millis(LOCK_DELAY_MS as u64);

/// One frame of the line-clear flash animation
pub const LINE_FLASH_MS: u32 = 60;

/// Number of flash frames played for a line clear
pub const LINE_FLASH_FRAMES: u32 = 3;

/// Drop intervals by level (milliseconds per row)
///
/// Index 0 = Level 0, Index 8 = Level 8+
pub const DROP_INTERVALS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Line clear scoring (Classic rules)
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Opaque decoration tag stored next to a block's color.
///
/// The core writes the locking mino's facing index here; renderers may use it
/// to pick a glyph. Nothing in the rules reads it back.
pub type Tag = u8;

/// Block colors.
///
/// Each color has a fixed uppercase symbol used by the text dump of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Blue,
    Cyan,
    Green,
    Magenta,
    Red,
    White,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 7] = [
        Color::Blue,
        Color::Cyan,
        Color::Green,
        Color::Magenta,
        Color::Red,
        Color::White,
        Color::Yellow,
    ];

    /// Uppercase dump symbol
    pub fn symbol(&self) -> char {
        match self {
            Color::Blue => 'B',
            Color::Cyan => 'C',
            Color::Green => 'G',
            Color::Magenta => 'M',
            Color::Red => 'R',
            Color::White => 'W',
            Color::Yellow => 'Y',
        }
    }

    /// Parse an uppercase dump symbol
    pub fn from_symbol(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.symbol() == ch)
    }
}

/// Mino shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinoKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl MinoKind {
    pub const ALL: [MinoKind; 7] = [
        MinoKind::I,
        MinoKind::J,
        MinoKind::L,
        MinoKind::O,
        MinoKind::S,
        MinoKind::T,
        MinoKind::Z,
    ];

    /// Color a mino of this kind is drawn and locked with
    pub fn color(&self) -> Color {
        match self {
            MinoKind::I => Color::Cyan,
            MinoKind::J => Color::Blue,
            MinoKind::L => Color::White,
            MinoKind::O => Color::Yellow,
            MinoKind::S => Color::Green,
            MinoKind::T => Color::Magenta,
            MinoKind::Z => Color::Red,
        }
    }

    /// Parse mino kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(MinoKind::I),
            "j" => Some(MinoKind::J),
            "l" => Some(MinoKind::L),
            "o" => Some(MinoKind::O),
            "s" => Some(MinoKind::S),
            "t" => Some(MinoKind::T),
            "z" => Some(MinoKind::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MinoKind::I => "i",
            MinoKind::J => "j",
            MinoKind::L => "l",
            MinoKind::O => "o",
            MinoKind::S => "s",
            MinoKind::T => "t",
            MinoKind::Z => "z",
        }
    }
}

/// Rotation facing (North = spawn orientation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    /// Rotate clockwise
    pub fn rotate_cw(&self) -> Self {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }

    /// Rotate counter-clockwise
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Facing::North => Facing::West,
            Facing::West => Facing::South,
            Facing::South => Facing::East,
            Facing::East => Facing::North,
        }
    }

    /// Number of clockwise quarter turns from North
    pub fn index(&self) -> u8 {
        match self {
            Facing::North => 0,
            Facing::East => 1,
            Facing::South => 2,
            Facing::West => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Facing::North => "north",
            Facing::East => "east",
            Facing::South => "south",
            Facing::West => "west",
        }
    }
}

/// Which mino a drawn block belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MinoLayer {
    /// Next piece, drawn in its own box coordinates
    Preview,
    /// Piece under player control
    Current,
    /// Landing position of the current piece (ghost)
    Drop,
}

/// Player and session actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateRight,
    RotateLeft,
    Start,
    Pause,
    Restart,
    PreviousPreset,
    NextPreset,
}

impl GameAction {
    /// Parse action from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotateright" => Some(GameAction::RotateRight),
            "rotateleft" => Some(GameAction::RotateLeft),
            "start" => Some(GameAction::Start),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            "previouspreset" => Some(GameAction::PreviousPreset),
            "nextpreset" => Some(GameAction::NextPreset),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateRight => "rotateRight",
            GameAction::RotateLeft => "rotateLeft",
            GameAction::Start => "start",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
            GameAction::PreviousPreset => "previousPreset",
            GameAction::NextPreset => "nextPreset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_symbols_round_trip() {
        for color in Color::ALL {
            assert_eq!(Color::from_symbol(color.symbol()), Some(color));
        }
        assert_eq!(Color::from_symbol('.'), None);
        assert_eq!(Color::from_symbol('b'), None);
    }

    #[test]
    fn every_kind_has_a_distinct_color() {
        let mut seen = Vec::new();
        for kind in MinoKind::ALL {
            assert!(!seen.contains(&kind.color()), "{:?} shares a color", kind);
            seen.push(kind.color());
        }
    }

    #[test]
    fn facing_rotations_are_inverse() {
        for facing in [Facing::North, Facing::East, Facing::South, Facing::West] {
            assert_eq!(facing.rotate_cw().rotate_ccw(), facing);
            assert_eq!(facing.rotate_cw().index(), (facing.index() + 1) % 4);
        }
    }

    #[test]
    fn game_action_parses_its_own_name() {
        for action in [
            GameAction::MoveLeft,
            GameAction::HardDrop,
            GameAction::RotateLeft,
            GameAction::NextPreset,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }
}
