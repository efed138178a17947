//! Pixel surfaces - the drawing target of the render loop.
//!
//! A surface is addressed in pixel coordinates with fractional rectangles, the
//! same way a 2D canvas context is. [`PixelBuffer`] is the in-memory
//! implementation used both for the terminal presenter and in tests.

use std::io;

use thiserror::Error;

use crate::types::{Rect, Rgb, SurfaceSize};

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("terminal size unavailable: {0}")]
    Unavailable(#[from] io::Error),
    #[error("container has no drawable area ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

/// A resizable 2D drawing target.
pub trait PixelSurface {
    fn size(&self) -> SurfaceSize;

    fn resize(&mut self, size: SurfaceSize);

    /// Reset every pixel to the surface's clear color.
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Paint the one-pixel outline of `rect`.
    fn stroke_rect(&mut self, rect: Rect, color: Rgb);
}

/// In-memory RGB surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    size: SurfaceSize,
    clear_color: Rgb,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    /// Black buffer of `size`
    pub fn new(size: SurfaceSize) -> Self {
        Self::with_clear_color(size, Rgb::new(0, 0, 0))
    }

    pub fn with_clear_color(size: SurfaceSize, clear_color: Rgb) -> Self {
        Self {
            size,
            clear_color,
            pixels: vec![clear_color; size.area()],
        }
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Color at `(x, y)`, or `None` outside the buffer
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some(self.pixels[y as usize * self.size.width as usize + x as usize])
    }

    #[inline(always)]
    fn put(&mut self, x: u32, y: u32, color: Rgb) {
        if x < self.size.width && y < self.size.height {
            let i = y as usize * self.size.width as usize + x as usize;
            self.pixels[i] = color;
        }
    }

    /// Pixel span `[lo, hi)` covered between two edges along one axis.
    ///
    /// A pixel is covered when its center lies inside the rectangle.
    fn span(start: f32, end: f32, limit: u32) -> (u32, u32) {
        let lo = (start - 0.5).ceil().max(0.0);
        let hi = (end - 0.5).ceil().max(0.0);
        let lo = (lo as u32).min(limit);
        let hi = (hi as u32).min(limit);
        (lo, hi.max(lo))
    }

    fn covered(&self, rect: Rect) -> (u32, u32, u32, u32) {
        let (x0, x1) = Self::span(rect.x, rect.right(), self.size.width);
        let (y0, y1) = Self::span(rect.y, rect.bottom(), self.size.height);
        (x0, x1, y0, y1)
    }
}

impl PixelSurface for PixelBuffer {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) {
        if self.size == size {
            return;
        }
        self.size = size;
        self.pixels.clear();
        self.pixels.resize(size.area(), self.clear_color);
    }

    fn clear(&mut self) {
        self.pixels.fill(self.clear_color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let (x0, x1, y0, y1) = self.covered(rect);
        for y in y0..y1 {
            for x in x0..x1 {
                self.put(x, y, color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb) {
        let (x0, x1, y0, y1) = self.covered(rect);
        if x0 == x1 || y0 == y1 {
            return;
        }
        for x in x0..x1 {
            self.put(x, y0, color);
            self.put(x, y1 - 1, color);
        }
        for y in y0..y1 {
            self.put(x0, y, color);
            self.put(x1 - 1, y, color);
        }
    }
}
