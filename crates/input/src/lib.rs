//! Terminal input module.
//!
//! Maps `crossterm` key events into [`InputCommand`]s. Moves become store
//! actions; pause and restart drive the session.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_key, should_quit, InputCommand};
