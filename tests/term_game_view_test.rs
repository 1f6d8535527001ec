use termtris::core::{Board, Grid, Mino, PresetCatalog};
use termtris::engine::Engine;
use termtris::term::{FrameBuffer, GameView, Viewport};
use termtris::types::{Facing, GameAction, MinoKind};

fn screen(fb: &FrameBuffer) -> String {
    (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect()
}

#[test]
fn term_view_renders_border_corners() {
    let engine = Engine::with_presets(PresetCatalog::builtin(), 1);
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let (fb, _) = view.render(&engine, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut rows = vec![".........."; 20];
    rows[19] = "R.........";
    let grid = Grid::from_debug_rows(&rows).unwrap();
    let current = Mino::new(MinoKind::O, Facing::North, 4, 0);
    let preview = Mino::spawn(MinoKind::T, grid.width());
    let engine = Engine::new(Board::from_position(grid, current, preview, 1));

    let (fb, layout) = GameView::default().render(&engine, Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    assert_eq!(layout.cell_origin(0, 19), (1, 20));
    assert_eq!(fb.get(1, 20).unwrap().ch, '█');
    assert_eq!(fb.get(2, 20).unwrap().ch, '█');
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let engine = Engine::with_presets(PresetCatalog::builtin(), 1);
    let view = GameView::default();

    let (narrow, _) = view.render(&engine, Viewport::new(22, 22));
    assert!(!screen(&narrow).contains("SCORE"));

    let (wide, _) = view.render(&engine, Viewport::new(60, 22));
    let all = screen(&wide);
    assert!(all.contains("SCORE"));
    assert!(all.contains("Classic"));
    assert!(all.contains("NEXT"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let engine = Engine::with_presets(PresetCatalog::builtin(), 1);

    // Board frame is 22 rows tall (20 + border).
    let (fb, _) = GameView::default().render(&engine, Viewport::new(22, 30));

    // start_y = (30 - 22) / 2 = 4 => top-left corner at (0,4).
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_frame_follows_preset_size() {
    let mut engine = Engine::with_presets(PresetCatalog::builtin(), 1);
    // Twin Wells is 12 columns wide
    for _ in 0..3 {
        engine.apply_action(GameAction::NextPreset);
    }
    let (fb, layout) = GameView::default().render(&engine, Viewport::new(26, 22));
    assert_eq!(layout.columns, 12);
    assert_eq!(fb.get(25, 0).unwrap().ch, '┐');
}

#[test]
fn term_view_shows_game_over_without_current_piece() {
    let grid = Grid::from_debug_rows(&["R.RR", "R.RR", "RRR."]).unwrap();
    let current = Mino::new(MinoKind::O, Facing::North, 1, -2);
    let preview = Mino::spawn(MinoKind::T, grid.width());
    let mut engine = Engine::new(Board::from_position(grid, current, preview, 1));
    engine.apply_action(GameAction::Start);
    engine.apply_action(GameAction::SoftDrop);

    let (fb, _) = GameView::default().render(&engine, Viewport::new(40, 10));
    let all = screen(&fb);
    assert!(all.contains("GAME OVER"));
    assert!(!all.contains("PRESS ENTER"));
}
