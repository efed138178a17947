//! Game bootstrap: wires the store, scheduler and loops together.
//!
//! A [`Game`] owns every component but the components only know the store and
//! the scheduler, never each other. The embedding program feeds it time through
//! [`Game::pump`] and actions through [`Game::dispatch`].

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::config::{ConfigError, GameConfig};
use crate::core::{Action, GameState, PieceSource, SharedStore, Store, SubscriptionId};
use crate::lifecycle::LifecycleController;
use crate::render::RenderLoop;
use crate::scheduler::{Due, Scheduled, Scheduler, SharedScheduler};
use crate::term::PixelSurface;
use crate::tick::TickController;
use crate::types::SurfaceSize;

pub struct Game<S: PixelSurface + 'static> {
    store: SharedStore,
    scheduler: SharedScheduler,
    surface: Rc<RefCell<S>>,
    tick: Rc<TickController>,
    render: Rc<RenderLoop<S>>,
    lifecycle: Rc<LifecycleController>,
    subscription: Option<SubscriptionId>,
}

impl<S: PixelSurface + 'static> Game<S> {
    /// Validate `config` and wire every component. Nothing is scheduled yet.
    pub fn new(
        config: &GameConfig,
        surface: S,
        source: Box<dyn PieceSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let store = Store::shared(GameState::new(config.rows, config.columns));
        let scheduler = Scheduler::shared(config.frame_ms as u64);
        let surface = Rc::new(RefCell::new(surface));

        let tick = Rc::new(TickController::new(
            store.clone(),
            scheduler.clone(),
            config.tick_ms as u64,
            source,
        ));
        let mut render = RenderLoop::new(store.clone(), scheduler.clone(), surface.clone());
        if config.perf_overlay {
            render = render.with_stats();
        }
        let render = Rc::new(render);
        let lifecycle = Rc::new(LifecycleController::new(
            tick.clone() as Rc<dyn Scheduled>,
            render.clone() as Rc<dyn Scheduled>,
        ));

        Ok(Self {
            store,
            scheduler,
            surface,
            tick,
            render,
            lifecycle,
            subscription: None,
        })
    }

    /// One-time startup: size the surface to its container, paint the empty
    /// board, spawn the first piece and start listening for the running flag.
    pub fn init(&mut self, container: SurfaceSize) {
        if self.subscription.is_some() {
            log::warn!("init called twice, ignoring");
            return;
        }
        self.surface.borrow_mut().resize(container);
        self.render.paint_now();

        let piece = self.tick.spawn();
        self.store
            .borrow_mut()
            .dispatch(Action::SetActivePiece(piece));

        let id = self.lifecycle.subscribe(&mut self.store.borrow_mut());
        self.subscription = Some(id);
        // Pick up a running flag set before we subscribed.
        self.lifecycle.on_state(self.store.borrow().state());
        log::info!(
            "initialized {}x{} board on {}x{} surface",
            self.store.borrow().rows(),
            self.store.borrow().columns(),
            container.width,
            container.height
        );
    }

    /// Forward `action` to the store
    pub fn dispatch(&self, action: Action) {
        self.store.borrow_mut().dispatch(action);
    }

    /// Empty the board and start a new round.
    pub fn restart(&self) {
        let piece = self.tick.spawn();
        self.dispatch(Action::Restart(piece));
    }

    /// Run every callback due at `now_ms`. Returns how many ran.
    pub fn pump(&self, now_ms: u64) -> usize {
        let mut ran = 0;
        loop {
            let due = self.scheduler.borrow_mut().pop_due(now_ms);
            match due {
                Some(Due::Interval(id)) if self.tick.owns(id) => {
                    self.tick.on_tick();
                }
                Some(Due::Frame(id)) => self.render.on_frame(id),
                Some(Due::Interval(id)) => {
                    log::warn!("dropping unowned interval {id:?}");
                    self.scheduler.borrow_mut().clear_interval(id);
                }
                None => break,
            }
            ran += 1;
        }
        ran
    }

    /// When `pump` next has work, if ever
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.borrow().next_deadline()
    }

    /// Resize the surface (container changed) and repaint once.
    pub fn resize(&self, size: SurfaceSize) {
        self.surface.borrow_mut().resize(size);
        self.render.paint_now();
    }

    /// Stop both loops and detach from the store.
    pub fn shutdown(&mut self) {
        self.lifecycle.shutdown();
        if let Some(id) = self.subscription.take() {
            self.store.borrow_mut().unsubscribe(id);
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Borrow the current snapshot
    pub fn state(&self) -> Ref<'_, GameState> {
        Ref::map(self.store.borrow(), |s| s.state())
    }

    pub fn scheduler(&self) -> &SharedScheduler {
        &self.scheduler
    }

    pub fn surface(&self) -> Ref<'_, S> {
        self.surface.borrow()
    }

    /// Perf overlay text, when enabled
    pub fn perf_label(&self) -> Option<String> {
        self.render.stats_label()
    }

    /// Whether the gravity interval is live
    pub fn is_ticking(&self) -> bool {
        self.tick.is_active()
    }

    /// Whether a frame is pending
    pub fn is_rendering(&self) -> bool {
        self.render.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FixedSource, TetrominoKind};
    use crate::term::PixelBuffer;

    fn game() -> Game<PixelBuffer> {
        let config = GameConfig {
            rows: 4,
            columns: 6,
            ..GameConfig::default()
        };
        Game::new(
            &config,
            PixelBuffer::new(SurfaceSize::new(1, 1)),
            Box::new(FixedSource::of(TetrominoKind::O)),
        )
        .unwrap()
    }

    #[test]
    fn init_spawns_and_stays_idle_until_running() {
        let mut game = game();
        game.init(SurfaceSize::new(60, 40));
        assert_eq!(game.surface().size(), SurfaceSize::new(60, 40));
        assert!(game.state().active.is_some());
        assert!(!game.is_ticking());
        assert_eq!(game.pump(10_000), 0);

        game.dispatch(Action::SetRunning(true));
        assert!(game.is_ticking());
        assert!(game.is_rendering());
    }

    #[test]
    fn init_twice_subscribes_once() {
        let mut game = game();
        game.init(SurfaceSize::new(60, 40));
        game.init(SurfaceSize::new(60, 40));
        assert_eq!(game.store().borrow().subscriber_count(), 1);
    }

    #[test]
    fn shutdown_cancels_everything() {
        let mut game = game();
        game.init(SurfaceSize::new(60, 40));
        game.dispatch(Action::SetRunning(true));
        game.shutdown();
        assert_eq!(game.scheduler().borrow().live_timers(), 0);
        assert_eq!(game.scheduler().borrow().live_frames(), 0);
        assert_eq!(game.store().borrow().subscriber_count(), 0);
    }

    fn build(config: GameConfig) -> Result<Game<PixelBuffer>, ConfigError> {
        Game::new(
            &config,
            PixelBuffer::new(SurfaceSize::new(1, 1)),
            Box::new(FixedSource::of(TetrominoKind::O)),
        )
    }

    #[test]
    fn invalid_config_is_rejected() {
        let empty = GameConfig {
            rows: 0,
            ..GameConfig::default()
        };
        assert!(matches!(build(empty), Err(ConfigError::EmptyBoard { .. })));

        // Too narrow for the bar, even if the dealt shape would fit.
        let narrow = GameConfig {
            columns: 3,
            ..GameConfig::default()
        };
        assert!(matches!(
            build(narrow),
            Err(ConfigError::TooNarrow { columns: 3, min: 4 })
        ));
    }
}
