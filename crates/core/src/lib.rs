//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the falling-block game and nothing else. It has
//! no dependencies on the terminal, timers or input, which makes it:
//!
//! - **Deterministic**: the same seed deals the same pieces
//! - **Testable**: every rule is a plain function over plain data
//! - **Portable**: the engine loops and any renderer sit on top of it
//!
//! # Module Structure
//!
//! - [`board`]: `rows x columns` occupancy grid and the commit (freeze) operation
//! - [`shape`]: square shape matrices and the active piece with its anchor
//! - [`collision`]: legality of a displaced piece against the board
//! - [`catalog`]: tetromino shapes, spawn anchors and piece sources
//! - [`rng`]: seeded 7-bag dealing
//! - [`store`]: the state holder, its actions, reducer and subscribers
//!
//! # Anchor offset
//!
//! A piece's anchor sits one row and one column before its shape matrix, so shape
//! cell `(y, x)` covers board cell `(row + y - 1, col + x - 1)`. Collision, commit
//! and rendering all use this same offset.
//!
//! # Example
//!
//! ```
//! use blockfall_core::{can_move_to, Action, ActivePiece, GameState, Shape, Store};
//! use blockfall_types::Direction;
//!
//! let mut store = Store::new(GameState::new(4, 6));
//! let square = Shape::from_rows(&[&[1, 1], &[1, 1]]);
//! store.dispatch(Action::SetActivePiece(ActivePiece::new(square, 0, 3)));
//!
//! let piece = store.active().unwrap();
//! assert!(can_move_to(store.board(), piece, 1, 0));
//!
//! store.dispatch(Action::MoveActivePiece(Direction::Down));
//! assert_eq!(store.active().unwrap().row, 1);
//! ```

pub mod board;
pub mod catalog;
pub mod collision;
pub mod rng;
pub mod shape;
pub mod store;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError};
pub use catalog::{spawn_anchor, Catalog, FixedSource, PieceSource, TetrominoKind};
pub use collision::{can_fall, can_move_to};
pub use rng::{PieceBag, SimpleRng};
pub use shape::{ActivePiece, Shape};
pub use store::{reduce, Action, GameState, SharedStore, Store, SubscriptionId};
