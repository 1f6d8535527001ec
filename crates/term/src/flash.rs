//! Line-clear flash animation.
//!
//! The board deletes rows only after the animation returns, so the flash is
//! played synchronously: a few frames written straight to the terminal over
//! the last rendered frame, with a short sleep between them. The view shares
//! where the board sits on screen through a [`FlashHandle`].

use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::{cursor, QueueableCommand};
use tracing::{trace, warn};

use crate::engine::LineClearAnimator;
use crate::fb::{CellStyle, Rgb};
use crate::game_view::BoardLayout;
use crate::renderer::Pen;
use crate::types::{LINE_FLASH_FRAMES, LINE_FLASH_MS};

#[derive(Debug, Default)]
struct FlashState {
    layout: Cell<BoardLayout>,
    played: Cell<bool>,
}

/// Shared between the render loop and the animator
#[derive(Debug, Clone, Default)]
pub struct FlashHandle(Rc<FlashState>);

impl FlashHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where the board was last drawn
    pub fn set_layout(&self, layout: BoardLayout) {
        self.0.layout.set(layout);
    }

    pub fn layout(&self) -> BoardLayout {
        self.0.layout.get()
    }

    /// Whether a flash was drawn since the last call. The screen no longer
    /// matches the renderer's last frame when this returns true.
    pub fn take_played(&self) -> bool {
        self.0.played.replace(false)
    }
}

pub struct LineFlash<W: Write> {
    out: W,
    handle: FlashHandle,
    frames: u32,
    frame: Duration,
}

impl LineFlash<io::Stdout> {
    /// Flash on stdout with the default timing
    pub fn stdout(handle: FlashHandle) -> Self {
        Self::new(
            io::stdout(),
            handle,
            LINE_FLASH_FRAMES,
            Duration::from_millis(LINE_FLASH_MS as u64),
        )
    }
}

impl<W: Write> LineFlash<W> {
    pub fn new(out: W, handle: FlashHandle, frames: u32, frame: Duration) -> Self {
        Self {
            out,
            handle,
            frames,
            frame,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn play(&mut self, rows: &[usize]) -> Result<()> {
        let layout = self.handle.layout();
        let bright = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(255, 255, 255)).bold();
        let dark = CellStyle::new(Rgb::new(30, 30, 40), Rgb::new(30, 30, 40));

        let mut buf = Vec::new();
        for frame in 0..self.frames {
            let style = if frame % 2 == 0 { bright } else { dark };
            let mut pen = Pen::default();
            buf.clear();
            for &row in rows {
                let Some(row) = u16::try_from(row).ok().filter(|&r| r < layout.rows) else {
                    continue;
                };
                let (sx, sy) = layout.cell_origin(0, row);
                for dy in 0..layout.cell_h {
                    buf.queue(cursor::MoveTo(sx, sy.saturating_add(dy)))?;
                    for _ in 0..layout.row_width() {
                        pen.print(&mut buf, '█', style)?;
                    }
                }
            }
            pen.finish(&mut buf)?;
            self.out.write_all(&buf)?;
            self.out.flush()?;
            if !self.frame.is_zero() {
                thread::sleep(self.frame);
            }
        }
        Ok(())
    }
}

impl<W: Write> LineClearAnimator for LineFlash<W> {
    fn animate(&mut self, rows: &[usize]) {
        trace!(?rows, "line flash");
        if let Err(err) = self.play(rows) {
            warn!(error = %err, "line flash failed");
        }
        self.handle.0.played.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> BoardLayout {
        BoardLayout {
            origin_x: 5,
            origin_y: 1,
            cell_w: 2,
            cell_h: 1,
            columns: 4,
            rows: 6,
        }
    }

    #[test]
    fn test_flash_writes_each_row_every_frame() {
        let handle = FlashHandle::new();
        handle.set_layout(layout());
        let mut flash = LineFlash::new(Vec::new(), handle.clone(), 3, Duration::ZERO);

        flash.animate(&[4, 5]);
        let text = String::from_utf8_lossy(flash.get_ref()).into_owned();
        // 2 rows x 8 columns x 3 frames
        assert_eq!(text.matches('█').count(), 48);
        assert!(handle.take_played());
        assert!(!handle.take_played());
    }

    #[test]
    fn test_rows_outside_the_board_are_skipped() {
        let handle = FlashHandle::new();
        handle.set_layout(layout());
        let mut flash = LineFlash::new(Vec::new(), handle.clone(), 1, Duration::ZERO);
        flash.animate(&[6, 100]);
        assert!(!String::from_utf8_lossy(flash.get_ref()).contains('█'));
        assert!(handle.take_played());
    }
}
