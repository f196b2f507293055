//! Match-3 runner (default binary).
//!
//! `play` (the default) runs the board on the terminal with crossterm and the
//! framebuffer renderer. `serve` exposes the same engine over the JSON line protocol.

mod config;

use std::fs;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use match3::adapter::run_server;
use match3::core::{Effect, GemGame, MoveRule};
use match3::input::{handle_key_event, should_quit, Cursor};
use match3::term::{BoardScene, BoardView, FrameBuffer, TerminalRenderer, Viewport};
use match3::types::{BoardAction, Gem};

use crate::config::{Cli, Command, Config};

/// Pause between refill frames when replaying a cascade.
const CASCADE_FRAME_MS: u64 = 120;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(&cli)?;

    match cli.command {
        Some(Command::Serve(_)) => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_max_level(config.log_level)
                .init();
            serve(&config)
        }
        Some(Command::Play) | None => {
            let log_file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.log_file)
                .with_context(|| format!("opening log file {}", config.log_file.display()))?;
            tracing_subscriber::fmt()
                .with_writer(Mutex::new(log_file))
                .with_ansi(false)
                .with_max_level(config.log_level)
                .init();

            let mut term = TerminalRenderer::new();
            term.enter()?;

            let result = play(&mut term, &config);

            // Always try to restore terminal state.
            let _ = term.exit();
            result
        }
    }
}

fn serve(config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(run_server(config.server.clone(), None))
}

fn play(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let rule = if config.adjacent_only {
        MoveRule::Adjacent
    } else {
        MoveRule::Colinear
    };
    let mut game = GemGame::seeded(config.width, config.height, config.kinds, config.seed)
        .with_rule(rule);
    let mut cursor = Cursor::new(config.width, config.height);
    let mut hint = None;
    let mut message = match game.rule() {
        MoveRule::Colinear => "Pick a gem, then a gem in the same row or column",
        MoveRule::Adjacent => "Pick a gem, then a gem next to it",
    }
    .to_string();

    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let scene = BoardScene {
            grid: game.grid(),
            cursor: cursor.position(),
            selected: cursor.selected(),
            hint,
            moves: game.moves(),
            message: &message,
        };
        view.render_into(&scene, viewport(), &mut fb);
        term.draw(&fb)?;

        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            Event::Resize(..) => {
                term.invalidate();
                continue;
            }
            _ => continue,
        };
        if should_quit(key) {
            return Ok(());
        }
        let Some(action) = handle_key_event(key) else {
            continue;
        };

        hint = None;
        match action {
            BoardAction::Hint => {
                hint = game.hint();
                message = match hint {
                    Some((a, b)) => {
                        cursor.jump_to(a);
                        format!("Try {} <-> {}", a, b)
                    }
                    None => "No moves left, press r for a new board".to_string(),
                };
            }
            BoardAction::Restart => {
                game.restart();
                game.settle();
                cursor = Cursor::new(config.width, config.height);
                message = "New board".to_string();
            }
            _ => {
                let Some(request) = cursor.apply(action) else {
                    continue;
                };
                let effects = game.play(request.from, request.to);
                animate(term, &view, &mut fb, &effects, &cursor, game.moves())?;
                message = describe(&effects);
                if !effects.is_empty() && game.hint().is_none() {
                    message.push_str("; no moves left, press r for a new board");
                }
            }
        }
    }
}

/// Replay the intermediate boards of a cascade before the final redraw.
fn animate(
    term: &mut TerminalRenderer,
    view: &BoardView,
    fb: &mut FrameBuffer,
    effects: &[Effect<Gem>],
    cursor: &Cursor,
    moves: u32,
) -> Result<()> {
    let refills: Vec<_> = effects.iter().filter_map(Effect::as_refill).collect();
    // The last refill is the final board, drawn by the main loop.
    let Some((_, frames)) = refills.split_last() else {
        return Ok(());
    };
    for &grid in frames {
        let scene = BoardScene {
            grid,
            cursor: cursor.position(),
            selected: None,
            hint: None,
            moves,
            message: "",
        };
        view.render_into(&scene, viewport(), fb);
        term.draw(fb)?;
        thread::sleep(Duration::from_millis(CASCADE_FRAME_MS));
    }
    Ok(())
}

fn describe<T>(effects: &[Effect<T>]) -> String {
    if effects.is_empty() {
        return "No match, swap rejected".to_string();
    }
    let runs = effects.iter().filter(|e| e.as_match().is_some()).count();
    let passes = effects.iter().filter(|e| e.as_refill().is_some()).count();
    if passes > 1 {
        format!("Cleared {} runs in a {}-step cascade", runs, passes)
    } else {
        format!("Cleared {} run{}", runs, if runs == 1 { "" } else { "s" })
    }
}

fn viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}
