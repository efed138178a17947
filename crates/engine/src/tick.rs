//! Gravity tick controller.
//!
//! Idle until started; while ticking, every period it either moves the active
//! piece down one row or, when that is illegal, freezes the piece into the
//! board and spawns the next one. All changes go through the store.

use std::cell::{Cell, RefCell};

use crate::core::{can_fall, can_move_to, Action, ActivePiece, PieceSource, SharedStore};
use crate::scheduler::{Scheduled, SharedScheduler, TimerId};
use crate::types::Direction;

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing was active; a piece was spawned
    Spawned,
    MovedDown,
    /// The piece was frozen and a replacement spawned
    Locked,
    /// The replacement overlapped the stack
    GameOver,
}

pub struct TickController {
    store: SharedStore,
    scheduler: SharedScheduler,
    period_ms: u64,
    handle: Cell<Option<TimerId>>,
    source: RefCell<Box<dyn PieceSource>>,
}

impl TickController {
    /// Idle controller stepping every `period_ms` once started
    pub fn new(
        store: SharedStore,
        scheduler: SharedScheduler,
        period_ms: u64,
        source: Box<dyn PieceSource>,
    ) -> Self {
        Self {
            store,
            scheduler,
            period_ms,
            handle: Cell::new(None),
            source: RefCell::new(source),
        }
    }

    /// Whether `id` is this controller's live interval.
    pub fn owns(&self, id: TimerId) -> bool {
        self.handle.get() == Some(id)
    }

    /// Deal a fresh piece sized for the store's board.
    pub fn spawn(&self) -> ActivePiece {
        let columns = self.store.borrow().columns();
        self.source.borrow_mut().next_piece(columns)
    }

    /// One gravity step against the current snapshot.
    pub fn on_tick(&self) -> TickOutcome {
        let step = {
            let store = self.store.borrow();
            store
                .active()
                .map(|piece| (can_fall(store.board(), piece), piece.shape.clone()))
        };

        match step {
            None => {
                let piece = self.spawn();
                self.store
                    .borrow_mut()
                    .dispatch(Action::SetActivePiece(piece));
                TickOutcome::Spawned
            }
            Some((true, _)) => {
                self.store
                    .borrow_mut()
                    .dispatch(Action::MoveActivePiece(Direction::Down));
                TickOutcome::MovedDown
            }
            Some((false, shape)) => {
                self.store
                    .borrow_mut()
                    .dispatch(Action::FreezeBoard(shape));

                let piece = self.spawn();
                let blocked = !can_move_to(self.store.borrow().board(), &piece, 0, 0);
                log::debug!("piece locked, spawning at ({}, {})", piece.row, piece.col);
                self.store
                    .borrow_mut()
                    .dispatch(Action::SetActivePiece(piece));

                if blocked {
                    log::info!("spawn position is blocked, game over");
                    self.store.borrow_mut().dispatch(Action::GameOver);
                    return TickOutcome::GameOver;
                }
                TickOutcome::Locked
            }
        }
    }
}

impl Scheduled for TickController {
    fn start(&self) {
        if self.handle.get().is_some() {
            return;
        }
        let id = self.scheduler.borrow_mut().set_interval(self.period_ms);
        self.handle.set(Some(id));
    }

    fn stop(&self) {
        if let Some(id) = self.handle.take() {
            self.scheduler.borrow_mut().clear_interval(id);
        }
    }

    fn is_active(&self) -> bool {
        self.handle.get().is_some()
    }
}
