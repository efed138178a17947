//! Keeps the tick controller and render loop in lockstep with the running flag.

use std::cell::Cell;
use std::rc::Rc;

use crate::core::{GameState, Store, SubscriptionId};
use crate::scheduler::Scheduled;

pub struct LifecycleController {
    tick: Rc<dyn Scheduled>,
    render: Rc<dyn Scheduled>,
    running: Cell<bool>,
}

impl LifecycleController {
    pub fn new(tick: Rc<dyn Scheduled>, render: Rc<dyn Scheduled>) -> Self {
        Self {
            tick,
            render,
            running: Cell::new(false),
        }
    }

    /// Start or stop both loops when `running` differs from what we last saw.
    ///
    /// Repeated notifications with an unchanged flag are no-ops, so timers and
    /// frames are never double-started.
    pub fn sync(&self, running: bool) {
        match (running, self.running.get()) {
            (true, false) => {
                log::info!("game running, starting loops");
                self.running.set(true);
                self.render.start();
                self.tick.start();
            }
            (false, true) => {
                log::info!("game stopped, stopping loops");
                self.running.set(false);
                self.render.stop();
                self.tick.stop();
            }
            _ => {}
        }
    }

    /// Store notification handler
    pub fn on_state(&self, state: &GameState) {
        self.sync(state.running);
    }

    /// Subscribe to `store`. The store only keeps a weak reference.
    pub fn subscribe(self: &Rc<Self>, store: &mut Store) -> SubscriptionId {
        let weak = Rc::downgrade(self);
        store.subscribe(move |state| {
            if let Some(lifecycle) = weak.upgrade() {
                lifecycle.on_state(state);
            }
        })
    }

    /// Stop both loops regardless of the last seen flag.
    pub fn shutdown(&self) {
        self.running.set(false);
        self.render.stop();
        self.tick.stop();
    }
}
