//! Game engine - the session around a board
//!
//! The engine owns a [`Board`] and everything the board reports to: the
//! drop timer, the scoreboard, the game-over flag and an optional line-clear
//! animation. It adds the session states the board knows nothing about:
//!
//! - **Preview**: preset selection; the board is shown but does not fall
//! - **Playing**: gravity runs and player commands reach the board
//! - **Paused**: the clock is frozen and commands are ignored
//! - **GameOver**: only restart or preset selection is accepted
//!
//! Time only moves when the caller invokes [`Engine::tick`], so the engine is
//! fully deterministic under test.

pub mod scoring;
pub mod timer;

use std::time::Duration;

use tracing::{debug, info};

use termtris_core::{Board, BoardEvents, PresetCatalog};
use termtris_types::GameAction;

pub use scoring::Scoreboard;
pub use timer::DropTimer;

/// Plays the line-clear animation. Rows stay on the board until `animate`
/// returns.
pub trait LineClearAnimator {
    fn animate(&mut self, rows: &[usize]);
}

/// Session state of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMode {
    Preview,
    Playing,
    Paused,
    GameOver,
}

impl EngineMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineMode::Preview => "preview",
            EngineMode::Playing => "playing",
            EngineMode::Paused => "paused",
            EngineMode::GameOver => "game_over",
        }
    }
}

/// The board's collaborator for one game
#[derive(Default)]
struct Session {
    timer: DropTimer,
    scoreboard: Scoreboard,
    over: bool,
    advisor_refreshes: u32,
    animator: Option<Box<dyn LineClearAnimator>>,
}

impl Session {
    fn reset(&mut self) {
        self.timer.disarm();
        self.scoreboard.reset();
        self.over = false;
        self.advisor_refreshes = 0;
    }
}

impl BoardEvents for Session {
    fn reset_timer(&mut self, delay: Duration) {
        if delay.is_zero() {
            self.timer.arm(self.scoreboard.drop_interval_ms());
        } else {
            self.timer.arm_duration(delay);
        }
    }

    fn game_over(&mut self) {
        self.over = true;
        self.timer.disarm();
    }

    fn add_score(&mut self, drop_distance: u32) {
        self.scoreboard.add_drop(drop_distance);
    }

    fn add_deleted_lines(&mut self, count: usize) {
        self.scoreboard.add_lines(count);
    }

    fn refresh_advisor(&mut self) {
        self.advisor_refreshes = self.advisor_refreshes.wrapping_add(1);
    }

    fn show_delete_animation(&mut self, rows: &[usize]) {
        if let Some(animator) = self.animator.as_mut() {
            animator.animate(rows);
        }
    }
}

/// Board plus session state
pub struct Engine {
    board: Board,
    session: Session,
    mode: EngineMode,
}

impl Engine {
    /// Wrap a board; the engine starts in [`EngineMode::Preview`]
    pub fn new(board: Board) -> Self {
        Self {
            board,
            session: Session::default(),
            mode: EngineMode::Preview,
        }
    }

    /// Create an engine on the catalog's selected preset
    pub fn with_presets(presets: PresetCatalog, seed: u32) -> Self {
        Self::new(Board::new(presets, seed))
    }

    /// Install the animation played before rows are deleted
    pub fn set_animator(&mut self, animator: Box<dyn LineClearAnimator>) {
        self.session.animator = Some(animator);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> EngineMode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.session.scoreboard.score()
    }

    pub fn lines(&self) -> u32 {
        self.session.scoreboard.lines()
    }

    pub fn level(&self) -> u32 {
        self.session.scoreboard.level()
    }

    /// Time left until the next gravity step, if one is pending
    pub fn timer_remaining_ms(&self) -> Option<u32> {
        self.session.timer.remaining_ms()
    }

    /// How many times a new current piece came into play
    pub fn advisor_refreshes(&self) -> u32 {
        self.session.advisor_refreshes
    }

    /// Advance the game clock. Returns whether a gravity step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.mode != EngineMode::Playing {
            return false;
        }
        if !self.session.timer.advance(elapsed_ms) {
            return false;
        }
        self.board.mino_move_down(&mut self.session);
        self.sync_game_over();
        true
    }

    /// Apply a player or session action. Returns whether it was accepted.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match self.mode {
            EngineMode::Preview => self.apply_in_preview(action),
            EngineMode::Playing => self.apply_in_play(action),
            EngineMode::Paused => match action {
                GameAction::Pause | GameAction::Start => {
                    self.mode = EngineMode::Playing;
                    info!("resumed");
                    true
                }
                GameAction::Restart => {
                    self.restart();
                    true
                }
                _ => false,
            },
            EngineMode::GameOver => match action {
                GameAction::Restart | GameAction::Start => {
                    self.restart();
                    true
                }
                GameAction::PreviousPreset | GameAction::NextPreset => {
                    self.restart();
                    self.apply_in_preview(action)
                }
                _ => false,
            },
        }
    }

    fn apply_in_preview(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start => {
                self.mode = EngineMode::Playing;
                self.session.timer.arm(self.session.scoreboard.drop_interval_ms());
                info!(preset = self.board.preset_name(), "game started");
                true
            }
            GameAction::PreviousPreset => {
                self.board.previous_preset();
                self.session.reset();
                debug!(preset = self.board.preset_name(), "preset selected");
                true
            }
            GameAction::NextPreset => {
                self.board.next_preset();
                self.session.reset();
                debug!(preset = self.board.preset_name(), "preset selected");
                true
            }
            _ => false,
        }
    }

    fn apply_in_play(&mut self, action: GameAction) -> bool {
        let events = &mut self.session;
        match action {
            GameAction::MoveLeft => self.board.mino_move_left(events),
            GameAction::MoveRight => self.board.mino_move_right(events),
            GameAction::SoftDrop => self.board.mino_move_down(events),
            GameAction::HardDrop => self.board.mino_drop(events),
            GameAction::RotateRight => self.board.mino_rotate_right(events),
            GameAction::RotateLeft => self.board.mino_rotate_left(events),
            GameAction::Pause => {
                self.mode = EngineMode::Paused;
                info!("paused");
                return true;
            }
            GameAction::Restart => {
                self.restart();
                return true;
            }
            GameAction::Start | GameAction::PreviousPreset | GameAction::NextPreset => {
                return false
            }
        }
        self.sync_game_over();
        true
    }

    /// Reset the board from the current preset and go back to preset
    /// selection
    pub fn restart(&mut self) {
        self.board.clear();
        self.session.reset();
        self.mode = EngineMode::Preview;
        debug!(preset = self.board.preset_name(), "restarted");
    }

    fn sync_game_over(&mut self) {
        if self.session.over && self.mode == EngineMode::Playing {
            self.mode = EngineMode::GameOver;
            info!(
                score = self.score(),
                lines = self.lines(),
                level = self.level(),
                "game over"
            );
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Board::default())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use termtris_core::{Grid, Mino};
    use termtris_types::{Facing, MinoKind, LOCK_DELAY_MS};

    fn engine(rows: &[&str], current: Mino) -> Engine {
        let grid = Grid::from_debug_rows(rows).unwrap();
        let preview = Mino::spawn(MinoKind::T, grid.width());
        Engine::new(Board::from_position(grid, current, preview, 7))
    }

    fn o_at(x: i32, y: i32) -> Mino {
        Mino::new(MinoKind::O, Facing::North, x, y)
    }

    struct Recorder(Rc<RefCell<Vec<Vec<usize>>>>);

    impl LineClearAnimator for Recorder {
        fn animate(&mut self, rows: &[usize]) {
            self.0.borrow_mut().push(rows.to_vec());
        }
    }

    #[test]
    fn test_gravity_waits_for_start() {
        let mut e = engine(&["...."; 6], o_at(1, 0));
        assert_eq!(e.mode(), EngineMode::Preview);
        assert!(!e.tick(5000));
        assert_eq!(e.board().current().y(), 0);

        assert!(e.apply_action(GameAction::Start));
        assert!(!e.tick(999));
        assert!(e.tick(1));
        assert_eq!(e.board().current().y(), 1);
        assert_eq!(e.timer_remaining_ms(), Some(1000));
    }

    #[test]
    fn test_hard_drop_locks_after_delay_and_scores() {
        let mut e = engine(&["....", "....", "....", "....", "....", "RR.."], o_at(2, 0));
        let rows = Rc::new(RefCell::new(Vec::new()));
        e.set_animator(Box::new(Recorder(rows.clone())));
        e.apply_action(GameAction::Start);

        assert!(e.apply_action(GameAction::HardDrop));
        assert_eq!(e.board().drop_distance(), 4);
        assert_eq!(e.timer_remaining_ms(), Some(LOCK_DELAY_MS));

        assert!(e.tick(LOCK_DELAY_MS));
        assert_eq!(*rows.borrow(), vec![vec![5]]);
        assert_eq!(e.lines(), 1);
        assert_eq!(e.score(), 4 + 40);
        assert_eq!(e.board().debug_board()[5], "..YY");
        assert_eq!(e.board().current().kind(), MinoKind::T);
        assert_eq!(e.advisor_refreshes(), 1);
        assert_eq!(e.timer_remaining_ms(), Some(1000));
    }

    #[test]
    fn test_pause_freezes_clock_and_commands() {
        let mut e = engine(&["...."; 6], o_at(1, 0));
        e.apply_action(GameAction::Start);
        assert!(e.apply_action(GameAction::Pause));
        assert_eq!(e.mode(), EngineMode::Paused);
        assert!(!e.tick(5000));
        assert!(!e.apply_action(GameAction::MoveLeft));
        assert_eq!(e.board().current().x(), 1);

        assert!(e.apply_action(GameAction::Pause));
        assert!(e.apply_action(GameAction::MoveLeft));
        assert_eq!(e.board().current().x(), 0);
        assert_eq!(e.timer_remaining_ms(), Some(1000));
    }

    #[test]
    fn test_overhanging_lock_ends_the_game() {
        let mut e = engine(&["RR.R", "RR.R"], o_at(0, -2));
        e.apply_action(GameAction::Start);
        e.apply_action(GameAction::SoftDrop);
        assert_eq!(e.mode(), EngineMode::GameOver);
        assert!(e.board().is_over());
        assert_eq!(e.timer_remaining_ms(), None);
        assert!(!e.apply_action(GameAction::MoveRight));
        assert!(!e.tick(10_000));
    }

    #[test]
    fn test_restart_returns_to_preview() {
        let mut e = engine(&["RR.R", "RR.R"], o_at(0, -2));
        e.apply_action(GameAction::Start);
        e.apply_action(GameAction::SoftDrop);
        assert!(e.apply_action(GameAction::Restart));
        assert_eq!(e.mode(), EngineMode::Preview);
        assert!(!e.board().is_over());
        assert_eq!(e.score(), 0);
        assert_eq!(e.board().debug_board(), ["RR.R", "RR.R"]);
    }

    #[test]
    fn test_presets_only_switch_outside_play() {
        let mut e = Engine::with_presets(PresetCatalog::builtin(), 3);
        assert!(e.apply_action(GameAction::NextPreset));
        assert_eq!(e.board().preset_index(), 1);
        assert!(e.apply_action(GameAction::PreviousPreset));
        assert!(e.apply_action(GameAction::PreviousPreset));
        assert_eq!(e.board().preset_index(), e.board().presets().len() - 1);

        e.apply_action(GameAction::Start);
        assert!(!e.apply_action(GameAction::NextPreset));
        assert_eq!(e.board().preset_index(), e.board().presets().len() - 1);
    }
}
