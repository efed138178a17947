//! Integration tests for the scheduled game loop

use blockfall::core::{Action, FixedSource, TetrominoKind};
use blockfall::engine::{BlockLayout, Game, GameConfig, Palette};
use blockfall::term::{PixelBuffer, PixelSurface};
use blockfall::types::{Direction, SurfaceSize};

fn game(rows: u16, columns: u16) -> Game<PixelBuffer> {
    let config = GameConfig {
        rows,
        columns,
        tick_ms: 100,
        frame_ms: 16,
        ..GameConfig::default()
    };
    let mut game = Game::new(
        &config,
        PixelBuffer::new(SurfaceSize::new(1, 1)),
        Box::new(FixedSource::of(TetrominoKind::O)),
    )
    .unwrap();
    game.init(SurfaceSize::new(60, 40));
    game
}

fn anchor(game: &Game<PixelBuffer>) -> (i32, i32) {
    let state = game.state();
    let piece = state.active.as_ref().unwrap();
    (piece.row, piece.col)
}

#[test]
fn test_initial_paint_shows_empty_board() {
    let game = game(4, 6);
    let palette = Palette::default();
    let surface = game.surface();
    // Painted before the first piece spawned.
    assert_eq!(surface.pixel(25, 5), Some(palette.empty.fill));
    assert_eq!(surface.pixel(9, 5), Some(Default::default()));
}

#[test]
fn test_end_to_end_square_lands_and_respawns() {
    let game = game(4, 6);
    game.dispatch(Action::SetRunning(true));
    assert_eq!(anchor(&game), (0, 3));

    for (now, row) in [(100, 1), (200, 2), (300, 3)] {
        game.pump(now);
        assert_eq!(anchor(&game), (row, 3), "at {now}ms");
    }

    game.pump(400);
    assert_eq!(anchor(&game), (0, 3));
    let state = game.state();
    assert_eq!(state.board.filled_count(), 4);
    for (row, col) in [(2, 2), (2, 3), (3, 2), (3, 3)] {
        assert_eq!(state.board.cell_at(row, col), Ok(true));
    }
}

#[test]
fn test_frames_paint_the_falling_piece() {
    let game = game(4, 6);
    game.dispatch(Action::SetRunning(true));
    game.pump(100);
    game.pump(112);

    let palette = Palette::default();
    let layout = BlockLayout::new(game.surface().size(), 4, 6);
    // Anchor (1, 3) puts the square on board rows 0..1, columns 2..3.
    let r = layout.block_rect(2, 1);
    let surface = game.surface();
    assert_eq!(
        surface.pixel(r.x as u32, r.y as u32),
        Some(palette.active.fill)
    );
    assert_eq!(surface.pixel(0, 0), Some(palette.empty.fill));
}

#[test]
fn test_pause_stops_both_loops() {
    let game = game(4, 6);
    game.dispatch(Action::SetRunning(true));
    game.pump(100);
    assert_eq!(anchor(&game), (1, 3));

    game.dispatch(Action::TogglePause);
    assert!(!game.is_ticking());
    assert!(!game.is_rendering());
    assert_eq!(game.scheduler().borrow().live_timers(), 0);
    assert_eq!(game.scheduler().borrow().live_frames(), 0);

    assert_eq!(game.pump(1_000), 0);
    assert_eq!(anchor(&game), (1, 3));

    game.dispatch(Action::TogglePause);
    assert!(game.is_ticking());
    game.pump(1_100);
    assert_eq!(anchor(&game), (2, 3));
}

#[test]
fn test_repeated_running_notifications_do_not_double_start() {
    let game = game(4, 6);
    game.dispatch(Action::SetRunning(true));
    game.dispatch(Action::SetRunning(true));
    game.dispatch(Action::MoveActivePiece(Direction::Left));
    assert_eq!(game.scheduler().borrow().live_timers(), 1);
    assert_eq!(game.scheduler().borrow().live_frames(), 1);
}

#[test]
fn test_stop_twice_leaves_nothing_scheduled() {
    let game = game(4, 6);
    game.dispatch(Action::SetRunning(true));
    game.dispatch(Action::SetRunning(false));
    game.dispatch(Action::SetRunning(false));
    assert_eq!(game.scheduler().borrow().live_timers(), 0);
    assert_eq!(game.scheduler().borrow().live_frames(), 0);
    assert_eq!(game.next_deadline(), None);
}

#[test]
fn test_game_over_halts_until_restart() {
    // Two rows: the first square fills the spawn cells once frozen.
    let game = game(2, 6);
    game.dispatch(Action::SetRunning(true));
    game.pump(100);
    game.pump(200);

    {
        let state = game.state();
        assert!(state.game_over);
        assert!(!state.running);
    }
    assert!(!game.is_ticking());
    assert!(!game.is_rendering());

    game.dispatch(Action::TogglePause);
    assert!(!game.state().running);

    game.restart();
    let state = game.state();
    assert!(state.running);
    assert!(!state.game_over);
    assert_eq!(state.board.filled_count(), 0);
    drop(state);
    assert!(game.is_ticking());
}

#[test]
fn test_render_rect_matches_surface_division() {
    for (w, h, rows, columns) in [(60, 40, 4, 6), (200, 400, 20, 10), (37, 91, 7, 3)] {
        let layout = BlockLayout::new(SurfaceSize::new(w, h), rows, columns);
        for (x, y) in [(0, 0), (1, 2), (columns as i32 - 1, rows as i32 - 1)] {
            let r = layout.block_rect(x, y);
            assert_eq!(r.w, w as f32 / columns as f32 - 1.0);
            assert_eq!(r.h, h as f32 / rows as f32 - 1.0);
        }
    }
}

#[test]
fn test_resize_repaints_at_new_size() {
    let game = game(4, 6);
    game.resize(SurfaceSize::new(120, 80));
    assert_eq!(game.surface().size(), SurfaceSize::new(120, 80));
    assert_eq!(
        game.surface().pixel(110, 70),
        Some(Palette::default().empty.fill)
    );
}
