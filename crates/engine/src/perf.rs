//! Frame statistics for the optional perf overlay.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::types::FPS_WINDOW_MS;

/// Rolling frames-per-second and last paint duration.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    /// Frame timestamps (scheduler ms) inside the averaging window
    frames: VecDeque<u64>,
    started: Option<Instant>,
    last_paint: Duration,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of a frame painted at scheduler time `now_ms`.
    pub fn begin(&mut self, now_ms: u64) {
        self.frames.push_back(now_ms);
        while let Some(&oldest) = self.frames.front() {
            if now_ms.saturating_sub(oldest) < FPS_WINDOW_MS {
                break;
            }
            self.frames.pop_front();
        }
        self.started = Some(Instant::now());
    }

    /// Mark the end of the current frame's paint
    pub fn end(&mut self) {
        if let Some(started) = self.started.take() {
            self.last_paint = started.elapsed();
        }
    }

    /// Frames painted during the last second.
    pub fn fps(&self) -> usize {
        self.frames.len()
    }

    /// Overlay text, e.g. `60 fps 0.4ms`.
    pub fn label(&self) -> String {
        format!(
            "{} fps {:.1}ms",
            self.fps(),
            self.last_paint.as_secs_f64() * 1000.0
        )
    }
}
