//! Game state store - the single source of truth for board, piece and run flag
//!
//! Every change goes through [`Store::dispatch`]: the reducer applies the
//! [`Action`] to the owned [`GameState`], then every subscriber is called with
//! the new state before `dispatch` returns. Subscribers only see a shared
//! reference, so they can observe but never mutate from inside a notification.

use std::cell::RefCell;
use std::rc::Rc;

use crate::board::Board;
use crate::collision::can_move_to;
use crate::shape::{ActivePiece, Shape};
use crate::types::Direction;

/// Snapshot of everything the loops read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub active: Option<ActivePiece>,
    pub running: bool,
    pub game_over: bool,
}

impl GameState {
    /// Empty board, no active piece, not running
    pub fn new(rows: u16, columns: u16) -> Self {
        Self {
            board: Board::new(rows, columns),
            active: None,
            running: false,
            game_over: false,
        }
    }

    pub fn rows(&self) -> u16 {
        self.board.rows()
    }

    pub fn columns(&self) -> u16 {
        self.board.columns()
    }
}

/// State transitions understood by the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the active piece (spawn)
    SetActivePiece(ActivePiece),
    /// Translate or rotate the active piece; dropped if the result is illegal
    MoveActivePiece(Direction),
    /// Lock `shape` into the board at the active piece's anchor
    FreezeBoard(Shape),
    SetRunning(bool),
    TogglePause,
    /// The freshly spawned piece overlaps the stack
    GameOver,
    /// Empty the board and start over with the given piece
    Restart(ActivePiece),
}

impl Action {
    /// Action name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetActivePiece(_) => "setActivePiece",
            Action::MoveActivePiece(_) => "moveActivePiece",
            Action::FreezeBoard(_) => "freezeBoard",
            Action::SetRunning(_) => "setRunning",
            Action::TogglePause => "togglePause",
            Action::GameOver => "gameOver",
            Action::Restart(_) => "restart",
        }
    }
}

/// Apply `action` to `state`. Returns whether anything changed.
pub fn reduce(state: &mut GameState, action: Action) -> bool {
    match action {
        Action::SetActivePiece(piece) => {
            state.active = Some(piece);
            true
        }
        Action::MoveActivePiece(direction) => {
            let Some(active) = state.active.as_ref() else {
                return false;
            };
            let candidate = match direction {
                Direction::Rotate => active.rotated(),
                _ => {
                    let (d_row, d_col) = direction.delta();
                    active.translated(d_row, d_col)
                }
            };
            if !can_move_to(&state.board, &candidate, 0, 0) {
                log::trace!("move {} rejected", direction.as_str());
                return false;
            }
            state.active = Some(candidate);
            true
        }
        Action::FreezeBoard(shape) => {
            let Some(active) = state.active.as_ref() else {
                return false;
            };
            state.board.commit(&shape, active.row, active.col) > 0
        }
        Action::SetRunning(running) => {
            if state.game_over && running {
                return false;
            }
            let changed = state.running != running;
            state.running = running;
            changed
        }
        Action::TogglePause => {
            if state.game_over {
                return false;
            }
            state.running = !state.running;
            true
        }
        Action::GameOver => {
            state.running = false;
            state.game_over = true;
            true
        }
        Action::Restart(piece) => {
            state.board.clear();
            state.active = Some(piece);
            state.game_over = false;
            state.running = true;
            true
        }
    }
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Subscriber = Box<dyn FnMut(&GameState)>;

/// Store shared between the tick controller, render loop and lifecycle controller.
pub type SharedStore = Rc<RefCell<Store>>;

pub struct Store {
    state: GameState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl Store {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Wrap a new store for sharing between controllers
    pub fn shared(state: GameState) -> SharedStore {
        Rc::new(RefCell::new(Self::new(state)))
    }

    /// Current snapshot
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.state.board
    }

    /// The falling piece, if one has spawned
    pub fn active(&self) -> Option<&ActivePiece> {
        self.state.active.as_ref()
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn rows(&self) -> u16 {
        self.state.rows()
    }

    pub fn columns(&self) -> u16 {
        self.state.columns()
    }

    /// Run the reducer, then notify every subscriber in subscription order.
    pub fn dispatch(&mut self, action: Action) {
        let name = action.name();
        let changed = reduce(&mut self.state, action);
        log::trace!("dispatch {name} (changed: {changed})");

        let state = &self.state;
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(state);
        }
    }

    /// Register `subscriber`; it is called after every dispatch.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&GameState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
