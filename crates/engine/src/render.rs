//! Display-synchronized render loop.
//!
//! While running, every frame re-requests the next frame and repaints the whole
//! board plus the active piece from the store's current snapshot. Painting is
//! read-only with respect to game state.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::{GameState, SharedStore};
use crate::perf::FrameStats;
use crate::scheduler::{FrameId, Scheduled, SharedScheduler};
use crate::term::PixelSurface;
use crate::types::{Rect, Rgb, SurfaceSize};

/// Fill and optional stroke color for one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockStyle {
    pub fill: Rgb,
    /// `None` is a transparent stroke
    pub stroke: Option<Rgb>,
}

impl BlockStyle {
    /// Solid block without a stroke
    pub const fn fill(fill: Rgb) -> Self {
        Self { fill, stroke: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub empty: BlockStyle,
    pub filled: BlockStyle,
    pub active: BlockStyle,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            empty: BlockStyle::fill(Rgb::new(255, 255, 255)),
            filled: BlockStyle::fill(Rgb::new(60, 179, 113)),
            active: BlockStyle::fill(Rgb::new(255, 0, 0)),
        }
    }
}

/// Block geometry for a board of `rows x columns` on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockLayout {
    pub block_w: f32,
    pub block_h: f32,
}

impl BlockLayout {
    /// Divide `size` evenly into `rows x columns` blocks
    pub fn new(size: SurfaceSize, rows: u16, columns: u16) -> Self {
        Self {
            block_w: size.width as f32 / columns.max(1) as f32,
            block_h: size.height as f32 / rows.max(1) as f32,
        }
    }

    /// Rectangle of the block at board column `x`, row `y`.
    ///
    /// One pixel is left off the right and bottom edges so the gaps form grid
    /// lines.
    pub fn block_rect(&self, x: i32, y: i32) -> Rect {
        Rect::new(
            self.block_w * x as f32,
            self.block_h * y as f32,
            self.block_w - 1.0,
            self.block_h - 1.0,
        )
    }
}

fn draw_block<S: PixelSurface + ?Sized>(surface: &mut S, rect: Rect, style: BlockStyle) {
    surface.fill_rect(rect, style.fill);
    if let Some(stroke) = style.stroke {
        surface.stroke_rect(rect, stroke);
    }
}

/// Paint one complete frame of `state` onto `surface`.
pub fn paint<S: PixelSurface + ?Sized>(state: &GameState, surface: &mut S, palette: &Palette) {
    surface.clear();
    let layout = BlockLayout::new(surface.size(), state.rows(), state.columns());

    for (row, col, filled) in state.board.iter() {
        let style = if filled { palette.filled } else { palette.empty };
        draw_block(surface, layout.block_rect(col as i32, row as i32), style);
    }

    if let Some(active) = &state.active {
        // Same anchor offset as collision and commit.
        for (row, col) in active.cells() {
            draw_block(surface, layout.block_rect(col, row), palette.active);
        }
    }
}

pub struct RenderLoop<S: PixelSurface> {
    store: SharedStore,
    scheduler: SharedScheduler,
    surface: Rc<RefCell<S>>,
    palette: Palette,
    handle: Cell<Option<FrameId>>,
    stats: Option<RefCell<FrameStats>>,
}

impl<S: PixelSurface> RenderLoop<S> {
    /// Idle loop painting the store onto `surface` with the default palette
    pub fn new(store: SharedStore, scheduler: SharedScheduler, surface: Rc<RefCell<S>>) -> Self {
        Self {
            store,
            scheduler,
            surface,
            palette: Palette::default(),
            handle: Cell::new(None),
            stats: None,
        }
    }

    /// Measure every painted frame for the perf overlay.
    pub fn with_stats(mut self) -> Self {
        self.stats = Some(RefCell::new(FrameStats::new()));
        self
    }

    /// Whether `id` is this loop's pending frame
    pub fn owns(&self, id: FrameId) -> bool {
        self.handle.get() == Some(id)
    }

    /// Overlay label, when stats are enabled.
    pub fn stats_label(&self) -> Option<String> {
        self.stats.as_ref().map(|s| s.borrow().label())
    }

    /// Paint immediately, outside the frame cadence.
    pub fn paint_now(&self) {
        let store = self.store.borrow();
        paint(store.state(), &mut *self.surface.borrow_mut(), &self.palette);
    }

    /// Frame callback: schedule the next frame, then repaint.
    pub fn on_frame(&self, id: FrameId) {
        if !self.owns(id) {
            return;
        }
        let (next, now) = {
            let mut scheduler = self.scheduler.borrow_mut();
            (scheduler.request_frame(), scheduler.now())
        };
        self.handle.set(Some(next));

        if let Some(stats) = &self.stats {
            stats.borrow_mut().begin(now);
        }
        self.paint_now();
        if let Some(stats) = &self.stats {
            stats.borrow_mut().end();
        }
    }
}

impl<S: PixelSurface> Scheduled for RenderLoop<S> {
    fn start(&self) {
        if self.handle.get().is_some() {
            return;
        }
        let id = self.scheduler.borrow_mut().request_frame();
        self.handle.set(Some(id));
    }

    fn stop(&self) {
        if let Some(id) = self.handle.take() {
            self.scheduler.borrow_mut().cancel_frame(id);
        }
    }

    fn is_active(&self) -> bool {
        self.handle.get().is_some()
    }
}
