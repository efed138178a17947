//! Presents a pixel surface on a character terminal.
//!
//! Each terminal cell shows two vertically stacked pixels using the upper half
//! block glyph: the top pixel is the foreground, the bottom pixel the
//! background. With typical 1:2 glyphs this makes pixels roughly square.
//! The last terminal row is reserved for a status line.

use crate::fb::{CellStyle, FrameBuffer};
use crate::surface::{PixelBuffer, SurfaceError};
use crate::types::{Rgb, SurfaceSize};

const UPPER_HALF: char = '▀';

/// Terminal viewport dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the pixel surface sits inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    /// Left edge, in terminal columns
    pub x: u16,
    /// Top edge, in terminal rows
    pub y: u16,
    /// Surface size, in pixels
    pub size: SurfaceSize,
}

/// Size the board's container to the viewport.
///
/// Blocks are square in pixel space and as large as fit next to the status row;
/// the container is centered.
pub fn fit_container(
    viewport: Viewport,
    rows: u16,
    columns: u16,
) -> Result<Container, SurfaceError> {
    let px_w = viewport.width as u32;
    let px_h = viewport.height.saturating_sub(1) as u32 * 2;
    let block = if rows == 0 || columns == 0 {
        0
    } else {
        (px_w / columns as u32).min(px_h / rows as u32)
    };
    if block == 0 {
        return Err(SurfaceError::Empty {
            width: px_w,
            height: px_h,
        });
    }

    let size = SurfaceSize::new(block * columns as u32, block * rows as u32);
    let used_rows = size.height.div_ceil(2) as u16;
    Ok(Container {
        x: (viewport.width - size.width as u16) / 2,
        y: (viewport.height.saturating_sub(1) - used_rows) / 2,
        size,
    })
}

/// Text shown on the bottom row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub left: String,
    /// Right-aligned, e.g. the perf overlay
    pub right: Option<String>,
}

/// Compose the surface and status line into `fb`, resizing it to `viewport`.
pub fn compose(
    pixels: &PixelBuffer,
    container: Container,
    status: &StatusLine,
    viewport: Viewport,
    fb: &mut FrameBuffer,
) {
    fb.resize(viewport.width, viewport.height);
    fb.clear(CellStyle::default().into_cell(' '));

    let backdrop = Rgb::new(0, 0, 0);
    let cell_rows = pixels.height().div_ceil(2);
    for ry in 0..cell_rows {
        for x in 0..pixels.width() {
            let top = pixels.pixel(x, ry * 2).unwrap_or(backdrop);
            let bottom = pixels.pixel(x, ry * 2 + 1).unwrap_or(backdrop);
            fb.set(
                container.x + x as u16,
                container.y + ry as u16,
                CellStyle::new(top, bottom).into_cell(UPPER_HALF),
            );
        }
    }

    if viewport.height == 0 {
        return;
    }
    let status_y = viewport.height - 1;
    let style = CellStyle::new(Rgb::new(200, 200, 200), backdrop);
    fb.put_str(0, status_y, &status.left, style);
    if let Some(right) = &status.right {
        let len = right.chars().count() as u16;
        let x = viewport.width.saturating_sub(len);
        fb.put_str(x, status_y, right, style.bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PixelSurface;
    use crate::types::Rect;

    #[test]
    fn container_uses_square_blocks() {
        let c = fit_container(Viewport::new(80, 24), 20, 10).unwrap();
        // 46 pixel rows / 20 rows = 2; 80 / 10 = 8 -> block 2.
        assert_eq!(c.size, SurfaceSize::new(20, 40));
        assert_eq!(c.x, 30);
        assert_eq!(c.y, 1);
    }

    #[test]
    fn container_rejects_tiny_viewport() {
        assert!(matches!(
            fit_container(Viewport::new(5, 24), 20, 10),
            Err(SurfaceError::Empty { .. })
        ));
    }

    #[test]
    fn compose_packs_two_pixels_per_cell() {
        let red = Rgb::new(255, 0, 0);
        let mut pixels = PixelBuffer::new(SurfaceSize::new(2, 2));
        pixels.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), red);

        let container = Container {
            x: 1,
            y: 0,
            size: pixels.size(),
        };
        let mut fb = FrameBuffer::new(1, 1);
        let status = StatusLine {
            left: "PAUSED".into(),
            right: Some("60 fps".into()),
        };
        compose(&pixels, container, &status, Viewport::new(12, 2), &mut fb);

        let cell = fb.get(1, 0).unwrap();
        assert_eq!(cell.ch, '▀');
        assert_eq!(cell.style.fg, red);
        assert_eq!(cell.style.bg, Rgb::new(0, 0, 0));
        assert_eq!(fb.row_text(1), "PAUSED60 fps");
    }
}
