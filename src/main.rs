//! Terminal runner (default binary).
//!
//! Sizes the board to the terminal, then drives the game's scheduler from wall
//! clock time while polling crossterm for input until the next deadline.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::{Action, Catalog};
use blockfall::engine::{Game, GameConfig};
use blockfall::input::{map_key, should_quit, InputCommand};
use blockfall::term::{
    compose, fit_container, FrameBuffer, PixelBuffer, StatusLine, TerminalRenderer, Viewport,
};

/// Upper bound on how long to wait for input when nothing is scheduled.
const IDLE_POLL_MS: u64 = 250;

fn main() -> Result<()> {
    let config = GameConfig::from_env();
    init_logging(&config)?;

    // Surface acquisition failures are fatal and reported once.
    let (width, height) = TerminalRenderer::size().context("cannot query terminal size")?;
    let viewport = Viewport::new(width, height);
    let container = fit_container(viewport, config.rows, config.columns)
        .context("terminal is too small for the board")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, viewport, container);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(config: &GameConfig) -> Result<()> {
    // The alternate screen owns stderr, so only log when a file is given.
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("cannot create log file {path}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    log::info!("config: {config:?}");
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    config: &GameConfig,
    mut viewport: Viewport,
    mut container: blockfall::term::Container,
) -> Result<()> {
    let mut game = Game::new(
        config,
        PixelBuffer::new(container.size),
        Box::new(Catalog::new(config.seed)),
    )?;
    game.init(container.size);
    game.dispatch(Action::SetRunning(true));

    let clock = Instant::now();
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    loop {
        let now = clock.elapsed().as_millis() as u64;
        game.pump(now);

        compose(
            &game.surface(),
            container,
            &status_line(&game),
            viewport,
            &mut fb,
        );
        term.present(&fb)?;

        let now = clock.elapsed().as_millis() as u64;
        let wait = game
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(now))
            .unwrap_or(IDLE_POLL_MS);
        if !event::poll(Duration::from_millis(wait))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    break;
                }
                match map_key(key) {
                    Some(InputCommand::Move(direction)) => {
                        if game.state().running {
                            game.dispatch(Action::MoveActivePiece(direction));
                        }
                    }
                    Some(InputCommand::TogglePause) => game.dispatch(Action::TogglePause),
                    Some(InputCommand::Restart) => game.restart(),
                    None => {}
                }
            }
            Event::Resize(width, height) => {
                viewport = Viewport::new(width, height);
                match fit_container(viewport, config.rows, config.columns) {
                    Ok(fitted) => {
                        container = fitted;
                        game.resize(container.size);
                    }
                    Err(err) => log::warn!("keeping previous layout: {err}"),
                }
                term.invalidate();
            }
            _ => {}
        }
    }

    game.shutdown();
    Ok(())
}

fn status_line(game: &Game<PixelBuffer>) -> StatusLine {
    let state = game.state();
    let left = if state.game_over {
        "GAME OVER  r: restart  q: quit"
    } else if !state.running {
        "PAUSED  space: resume  q: quit"
    } else {
        "←/→ move  ↑ rotate  ↓ drop  space: pause  q: quit"
    };
    StatusLine {
        left: left.to_string(),
        right: game.perf_label(),
    }
}
