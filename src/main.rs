//! Terminal game runner (default binary).
//!
//! Drives the sync game session from a crossterm event loop. When a game
//! ends the final score goes to the high score service fire-and-forget; the
//! next game starts immediately either way.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::Game;
use blockfall::input::{handle_key_event, should_quit};
use blockfall::scores::ScoreReporter;
use blockfall::term::{GameView, TerminalRenderer};
use blockfall::types::TICK_MS;

/// How long the end-of-game banner stays on screen.
const BANNER_MS: u32 = 2000;

fn main() -> Result<()> {
    let reporter = ScoreReporter::start_from_env();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, reporter.as_ref());

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, reporter: Option<&ScoreReporter>) -> Result<()> {
    let mut game = Game::new(wall_clock_seed());
    let view = GameView::default();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut banner_ms: u32 = 0;

    loop {
        // Render.
        let snap = game.snapshot();
        let banner = (banner_ms > 0).then_some("GAME OVER");
        term.draw(&view, &snap, banner)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        game.apply(command);
                    }
                }
            }
        }

        // Tick with the real elapsed time so gravity stays wall-clock paced.
        if last_tick.elapsed() >= tick_duration {
            let elapsed_ms = last_tick.elapsed().as_millis() as u32;
            last_tick = Instant::now();

            game.tick(elapsed_ms);
            banner_ms = banner_ms.saturating_sub(elapsed_ms);

            if let Some(over) = game.take_game_over() {
                banner_ms = BANNER_MS;
                if let Some(reporter) = reporter {
                    reporter.report(over.score);
                }
            }
        }
    }
}

fn wall_clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u32
}
