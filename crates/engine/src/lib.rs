//! Game engine - the real-time loops around the core rules
//!
//! Everything runs on one thread. A [`Scheduler`] holds two kinds of pending
//! work, the gravity interval and display frames, and the owner drains it with
//! the current time. Components never call each other directly; they share the
//! [`Store`](crate::core::Store) and the scheduler:
//!
//! - [`tick`]: moves the active piece down, or freezes it and spawns the next
//! - [`render`]: repaints board and piece on every display frame
//! - [`lifecycle`]: starts/stops both loops as the store's running flag flips
//! - [`game`]: one-time bootstrap and the drain loop
//! - [`config`]: environment-driven session configuration
//! - [`perf`]: frame statistics for the optional overlay

pub mod config;
pub mod game;
pub mod lifecycle;
pub mod perf;
pub mod render;
pub mod scheduler;
pub mod tick;

pub use blockfall_core as core;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::{ConfigError, GameConfig};
pub use game::Game;
pub use lifecycle::LifecycleController;
pub use perf::FrameStats;
pub use render::{paint, BlockLayout, BlockStyle, Palette, RenderLoop};
pub use scheduler::{Due, FrameId, Scheduled, Scheduler, SharedScheduler, TimerId};
pub use tick::{TickController, TickOutcome};
