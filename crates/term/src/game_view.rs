//! GameView: maps an [`Engine`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). The board draws itself through a
//! [`BlockSink`] that paints into the framebuffer, so the view never reads the
//! grid directly.

use crate::core::BlockSink;
use crate::engine::{Engine, EngineMode};
use crate::fb::{CellStyle, FrameBuffer, Glyph, Rgb};
use crate::types::{Color, MinoLayer, Tag};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Side length of the preview box in cells (fits every mino)
const PREVIEW_BOX: u16 = 4;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the board's cells landed on screen in the last render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardLayout {
    /// Screen position of cell (0, 0)
    pub origin_x: u16,
    pub origin_y: u16,
    pub cell_w: u16,
    pub cell_h: u16,
    pub columns: u16,
    pub rows: u16,
}

impl BoardLayout {
    /// Screen position of the top-left corner of a board cell
    pub fn cell_origin(&self, x: u16, y: u16) -> (u16, u16) {
        (
            self.origin_x.saturating_add(x.saturating_mul(self.cell_w)),
            self.origin_y.saturating_add(y.saturating_mul(self.cell_h)),
        )
    }

    /// Screen width of one board row
    pub fn row_width(&self) -> u16 {
        self.columns.saturating_mul(self.cell_w)
    }
}

/// Paints board blocks into a framebuffer
struct BoardPainter<'a> {
    fb: &'a mut FrameBuffer,
    layout: BoardLayout,
    /// Screen position of the preview box, if the panel has room for it
    preview_at: Option<(u16, u16)>,
}

impl BoardPainter<'_> {
    fn fill(&mut self, sx: u16, sy: u16, ch: char, style: CellStyle) {
        self.fb
            .fill_rect(sx, sy, self.layout.cell_w, self.layout.cell_h, ch, style);
    }

    fn fill_cell(&mut self, x: i32, y: i32, ch: char, style: CellStyle) {
        let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
            return;
        };
        let (sx, sy) = self.layout.cell_origin(x, y);
        self.fill(sx, sy, ch, style);
    }
}

impl BlockSink for BoardPainter<'_> {
    fn draw_block(&mut self, x: i32, y: i32, color: Color, _tag: Tag) {
        let style = CellStyle::new(Rgb::of(color), BOARD_BG);
        self.fill_cell(x, y, '█', style);
    }

    fn draw_mino_block(&mut self, layer: MinoLayer, x: i32, y: i32, color: Color, _tag: Tag) {
        match layer {
            MinoLayer::Current => {
                let style = CellStyle::new(Rgb::of(color), BOARD_BG).bold();
                self.fill_cell(x, y, '█', style);
            }
            MinoLayer::Drop => {
                let style = CellStyle::new(Rgb::new(140, 140, 140), BOARD_BG).dim();
                self.fill_cell(x, y, '░', style);
            }
            MinoLayer::Preview => {
                let Some((px, py)) = self.preview_at else {
                    return;
                };
                let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
                    return;
                };
                let style = CellStyle::new(Rgb::of(color), PANEL_BG);
                self.fill(
                    px.saturating_add(x.saturating_mul(self.layout.cell_w)),
                    py.saturating_add(y.saturating_mul(self.layout.cell_h)),
                    '█',
                    style,
                );
            }
        }
    }
}

/// A lightweight terminal view of the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render the engine into an existing framebuffer and report where the
    /// board landed.
    pub fn render_into(&self, engine: &Engine, viewport: Viewport, fb: &mut FrameBuffer) -> BoardLayout {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let board = engine.board();
        let columns = u16::try_from(board.width()).unwrap_or(u16::MAX);
        let rows = u16::try_from(board.height()).unwrap_or(u16::MAX);
        let frame_w = columns.saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = rows.saturating_mul(self.cell_h).saturating_add(2);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let layout = BoardLayout {
            origin_x: start_x + 1,
            origin_y: start_y + 1,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
            columns,
            rows,
        };

        // Empty play area with grid dots.
        let dots = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        for y in 0..rows {
            for x in 0..columns {
                let (sx, sy) = layout.cell_origin(x, y);
                fb.fill_rect(sx, sy, self.cell_w, self.cell_h, '·', dots);
            }
        }
        draw_border(fb, start_x, start_y, frame_w, frame_h);

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        let preview_at = self.draw_side_panel(fb, engine, viewport, panel_x, start_y);

        let mut painter = BoardPainter {
            fb,
            layout,
            preview_at,
        };
        board.draw_board(&mut painter);
        if engine.mode() != EngineMode::GameOver {
            board.draw_drop_mino(&mut painter);
            board.draw_current_mino(&mut painter);
        }
        board.draw_preview_mino(&mut painter);

        match engine.mode() {
            EngineMode::Preview => {
                draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PRESS ENTER");
            }
            EngineMode::Paused => draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED"),
            EngineMode::GameOver => {
                draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
            }
            EngineMode::Playing => {}
        }

        layout
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, engine: &Engine, viewport: Viewport) -> (FrameBuffer, BoardLayout) {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        let layout = self.render_into(engine, viewport, &mut fb);
        (fb, layout)
    }

    /// Draws the text panel and returns where the preview box goes.
    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        engine: &Engine,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) -> Option<(u16, u16)> {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return None;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = start_y;
        fb.put_str(panel_x, y, "PRESET", label);
        fb.put_str(panel_x, y + 1, engine.board().preset_name(), value);
        if engine.mode() == EngineMode::Preview {
            fb.put_str(panel_x, y + 2, "[ ] to change", value.dim());
            y += 1;
        }
        y += 3;

        for (name, number) in [
            ("SCORE", engine.score()),
            ("LEVEL", engine.level()),
            ("LINES", engine.lines()),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, number, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT", label);
        let box_y = y + 1;
        let box_bottom = box_y.saturating_add(PREVIEW_BOX.saturating_mul(self.cell_h));
        (box_bottom <= viewport.height).then_some((panel_x, box_y))
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    let style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
    let (right, bottom) = (x + w - 1, y + h - 1);
    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    fb.fill_rect(x + 1, y, w - 2, 1, '─', style);
    fb.fill_rect(x + 1, bottom, w - 2, 1, '─', style);
    fb.fill_rect(x, y + 1, 1, h - 2, '│', style);
    fb.fill_rect(right, y + 1, 1, h - 2, '│', style);
}

fn draw_overlay_text(fb: &mut FrameBuffer, start_x: u16, start_y: u16, frame_w: u16, frame_h: u16, text: &str) {
    let mid_y = start_y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    fb.put_str(x, mid_y, text, style);
}
