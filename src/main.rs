//! Terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `termtris-term`.
//! Configuration comes from `TERMTRIS_*` environment variables, see
//! [`termtris::config`].

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use tracing::{error, info};

use termtris::core::PresetCatalog;
use termtris::engine::Engine;
use termtris::input::{handle_key_event, should_quit};
use termtris::term::{FlashHandle, FrameBuffer, GameView, LineFlash, TerminalRenderer, Viewport};
use termtris::{logging, Config};

fn main() -> Result<()> {
    let config = Config::from_env();
    logging::init(config.log_path.as_deref())?;
    let presets = config.preset_catalog()?;
    info!(seed = config.seed, presets = presets.len(), "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, presets);

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        error!(error = %err, "failed to restore terminal");
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &Config, presets: PresetCatalog) -> Result<()> {
    let mut engine = Engine::with_presets(presets, config.seed);
    let flash = FlashHandle::new();
    engine.set_animator(Box::new(LineFlash::stdout(flash.clone())));

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let tick_duration = Duration::from_millis(config.tick_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let layout = view.render_into(&engine, Viewport::new(w, h), &mut fb);
        flash.set_layout(layout);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!(score = engine.score(), "quit");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        engine.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            engine.tick(u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX));
        }

        // The flash drew over the last frame and took wall time of its own.
        if flash.take_played() {
            term.invalidate();
            last_tick = Instant::now();
        }
    }
}
