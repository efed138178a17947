//! Cooperative single-threaded scheduler.
//!
//! Two kinds of work are scheduled here: fixed-period intervals (gravity) and
//! single-shot display frames (repaint). The scheduler never calls anything
//! itself. The owner drains it with [`Scheduler::pop_due`] and routes each
//! [`Due`] to whoever holds the matching handle, one at a time, so callbacks
//! run to completion and never overlap.
//!
//! Cancelling removes the entry immediately: a cancelled handle is never
//! returned by `pop_due`, even if it was already due.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(u64);

/// A unit of work that has come due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Due {
    Interval(TimerId),
    Frame(FrameId),
}

/// Something the lifecycle controller can switch on and off.
pub trait Scheduled {
    fn start(&self);
    fn stop(&self);
    fn is_active(&self) -> bool;
}

pub type SharedScheduler = Rc<RefCell<Scheduler>>;

#[derive(Debug, Clone)]
struct Interval {
    id: TimerId,
    period_ms: u64,
    next_at: u64,
}

#[derive(Debug, Clone)]
struct FrameRequest {
    id: FrameId,
    due_at: u64,
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    frame_interval_ms: u64,
    now_ms: u64,
    next_id: u64,
    intervals: Vec<Interval>,
    frames: Vec<FrameRequest>,
}

impl Scheduler {
    /// Scheduler whose frames land on multiples of `frame_interval_ms`
    pub fn new(frame_interval_ms: u64) -> Self {
        Self {
            frame_interval_ms: frame_interval_ms.max(1),
            now_ms: 0,
            next_id: 0,
            intervals: Vec::new(),
            frames: Vec::new(),
        }
    }

    pub fn shared(frame_interval_ms: u64) -> SharedScheduler {
        Rc::new(RefCell::new(Self::new(frame_interval_ms)))
    }

    /// Time of the most recent `pop_due`/`advance_to`, in milliseconds.
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Move the clock forward. Time never runs backwards.
    pub fn advance_to(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn next_raw_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fire every `period_ms`, starting one period from now.
    pub fn set_interval(&mut self, period_ms: u64) -> TimerId {
        let id = TimerId(self.next_raw_id());
        let period_ms = period_ms.max(1);
        self.intervals.push(Interval {
            id,
            period_ms,
            next_at: self.now_ms + period_ms,
        });
        id
    }

    /// Returns false if the interval was not live.
    pub fn clear_interval(&mut self, id: TimerId) -> bool {
        let before = self.intervals.len();
        self.intervals.retain(|i| i.id != id);
        self.intervals.len() != before
    }

    /// Request one callback on the next display frame boundary.
    pub fn request_frame(&mut self) -> FrameId {
        let id = FrameId(self.next_raw_id());
        let fi = self.frame_interval_ms;
        self.frames.push(FrameRequest {
            id,
            due_at: (self.now_ms / fi + 1) * fi,
        });
        id
    }

    /// Returns false if the request was not pending.
    pub fn cancel_frame(&mut self, id: FrameId) -> bool {
        let before = self.frames.len();
        self.frames.retain(|f| f.id != id);
        self.frames.len() != before
    }

    /// Number of intervals not yet cleared
    pub fn live_timers(&self) -> usize {
        self.intervals.len()
    }

    /// Number of pending frame requests
    pub fn live_frames(&self) -> usize {
        self.frames.len()
    }

    /// Earliest time anything is due, if anything is scheduled.
    pub fn next_deadline(&self) -> Option<u64> {
        let timers = self.intervals.iter().map(|i| i.next_at);
        let frames = self.frames.iter().map(|f| f.due_at);
        timers.chain(frames).min()
    }

    /// Take the earliest due unit at `now_ms`.
    ///
    /// Intervals win ties against frames so a repaint at the same instant sees
    /// the post-tick state. An interval fires at most once per deadline it
    /// reaches; periods missed while the loop was stalled are dropped rather
    /// than replayed in a burst.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<Due> {
        self.advance_to(now_ms);
        let now = self.now_ms;

        let timer = self
            .intervals
            .iter()
            .enumerate()
            .filter(|(_, i)| i.next_at <= now)
            .min_by_key(|(_, i)| i.next_at)
            .map(|(idx, i)| (idx, i.next_at));
        let frame = self
            .frames
            .iter()
            .enumerate()
            .filter(|(_, f)| f.due_at <= now)
            .min_by_key(|(_, f)| f.due_at)
            .map(|(idx, f)| (idx, f.due_at));

        match (timer, frame) {
            (Some((ti, t_at)), Some((_, f_at))) if t_at <= f_at => Some(self.fire_interval(ti)),
            (Some((ti, _)), None) => Some(self.fire_interval(ti)),
            (_, Some((fi, _))) => {
                let req = self.frames.remove(fi);
                Some(Due::Frame(req.id))
            }
            (None, None) => None,
        }
    }

    fn fire_interval(&mut self, idx: usize) -> Due {
        let now = self.now_ms;
        let interval = &mut self.intervals[idx];
        interval.next_at += interval.period_ms;
        if interval.next_at <= now {
            interval.next_at = now + interval.period_ms;
        }
        Due::Interval(interval.id)
    }
}
