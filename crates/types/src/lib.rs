//! Core types module - shared data structures and constants
//!
//! This module defines the plain data used across the workspace: board and timing
//! defaults, movement directions, colors and pixel-space geometry. Nothing here
//! performs I/O, so it is usable from the core rules, the engine loops and the
//! terminal presenter alike.
//!
//! # Board Dimensions
//!
//! The board size is chosen per session (see `blockfall-engine`'s `GameConfig`).
//! The defaults are the classic 10 columns by 20 rows.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_MS` | 100 | Gravity period: one row per tick |
//! | `DEFAULT_FRAME_MS` | 16 | Display frame interval (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Direction, Rect, DEFAULT_COLUMNS, DEFAULT_ROWS};
//!
//! assert_eq!(Direction::Left.delta(), (0, -1));
//! assert_eq!(Direction::Rotate.as_str(), "rotate");
//!
//! let r = Rect::new(8.0, 4.0, 7.0, 3.0);
//! assert_eq!(r.right(), 15.0);
//!
//! assert_eq!(DEFAULT_COLUMNS, 10);
//! assert_eq!(DEFAULT_ROWS, 20);
//! ```

/// Default board width in cells
pub const DEFAULT_COLUMNS: u16 = 10;

/// Default board height in cells
pub const DEFAULT_ROWS: u16 = 20;

/// Default gravity period in milliseconds
pub const DEFAULT_TICK_MS: u32 = 100;

/// Default display frame interval in milliseconds (16ms ≈ 60 FPS)
pub const DEFAULT_FRAME_MS: u32 = 16;

/// Window over which the perf overlay averages frames per second
pub const FPS_WINDOW_MS: u64 = 1000;


/// Direction of an active-piece move
///
/// Only `Down` is driven by the gravity tick; the others come from input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Left,
    Right,
    Rotate,
}

impl Direction {
    /// Lowercase name, used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Rotate => "rotate",
        }
    }

    /// Anchor translation `(d_row, d_col)` for this direction.
    ///
    /// `Rotate` does not translate; it replaces the shape in place.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Rotate => (0, 0),
        }
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Size of a pixel surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels
    pub fn area(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }
}

/// Axis-aligned rectangle in pixel space.
///
/// Coordinates are fractional: block sizes come from dividing the surface
/// size by the board dimensions, which rarely divides evenly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// X coordinate of the right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Y coordinate of the bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}
