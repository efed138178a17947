//! blockfall (workspace facade crate).
//!
//! Re-exports the member crates under short names so binaries, tests and benches
//! can write `blockfall::core::Board` or `blockfall::engine::Game`.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
