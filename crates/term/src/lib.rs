//! Terminal output for the game.
//!
//! The render loop paints into a [`PixelSurface`]; this crate turns that pixel
//! surface into something a terminal can show:
//!
//! - [`surface`]: the pixel surface trait and the in-memory [`PixelBuffer`]
//! - [`present`]: container fitting and half-block composition into a framebuffer
//! - [`fb`]: the character framebuffer
//! - [`renderer`]: the crossterm-backed, diffing [`TerminalRenderer`]

pub mod fb;
pub mod present;
pub mod renderer;
pub mod surface;

pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use present::{compose, fit_container, Container, StatusLine, Viewport};
pub use renderer::{changed_runs, encode_changes, encode_full, Run, TerminalRenderer};
pub use surface::{PixelBuffer, PixelSurface, SurfaceError};
