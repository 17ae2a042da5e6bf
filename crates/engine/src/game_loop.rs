use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use wolfcast_common::EngineConfig;
use wolfcast_input::SharedInput;
use wolfcast_kernel::World;
use wolfcast_render::{Renderer, SlabRenderer};

use crate::clock::{Clock, SystemClock};
use crate::presenter::{PresentError, Presenter};

/// How long an iteration with no due update yields the CPU.
const IDLE_SLEEP: Duration = Duration::from_millis(1);

/// Thread-safe request to stop the loop. Clones share the same flag, so the
/// window's close handler (or anything else) can hold one.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Terminal. The presenter has been closed.
    Stopped,
}

/// What one loop iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iteration {
    /// Fixed updates run to catch up with real time.
    pub updates: u32,
    /// Whether a frame was rendered and presented.
    pub rendered: bool,
}

/// Running totals since the loop was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopStats {
    pub iterations: u64,
    pub ticks: u64,
    pub frames: u64,
    pub idle_iterations: u64,
}

/// Accumulates one second of activity for the rate log line.
#[derive(Debug, Default)]
struct RateWindow {
    elapsed: f64,
    ticks: u64,
    frames: u64,
}

/// Fixed-timestep game loop.
///
/// Real time is accumulated in `unprocessed`; each whole `frame_cap` of it
/// runs one `World::update` with exactly `frame_cap` as its step, followed by
/// an input snapshot. If any update ran, the world is rendered once and
/// handed to the presenter; otherwise the loop idles briefly. Simulation
/// rate is therefore fixed while display rate follows whatever the machine
/// delivers.
pub struct GameLoop<P, C = SystemClock> {
    world: World,
    renderer: SlabRenderer,
    input: SharedInput,
    stop: StopSignal,
    presenter: P,
    clock: C,
    state: LoopState,
    frame_cap: f64,
    unprocessed: f64,
    stats: LoopStats,
    window: RateWindow,
}

impl<P: Presenter> GameLoop<P, SystemClock> {
    pub fn new(config: &EngineConfig, world: World, input: SharedInput, presenter: P) -> Self {
        Self::with_clock(config, world, input, presenter, SystemClock::new())
    }
}

impl<P: Presenter, C: Clock> GameLoop<P, C> {
    pub fn with_clock(
        config: &EngineConfig,
        world: World,
        input: SharedInput,
        presenter: P,
        clock: C,
    ) -> Self {
        Self {
            world,
            renderer: SlabRenderer::from_config(config),
            input,
            stop: StopSignal::new(),
            presenter,
            clock,
            state: LoopState::Running,
            frame_cap: config.frame_cap(),
            unprocessed: 0.0,
            stats: LoopStats::default(),
            window: RateWindow::default(),
        }
    }

    /// Use an existing signal, e.g. one already handed to the presenter.
    pub fn with_stop_signal(mut self, stop: StopSignal) -> Self {
        self.stop = stop;
        self
    }

    /// A handle that stops the loop when raised.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Request a stop; takes effect at the top of the next `run` iteration.
    pub fn stop(&self) {
        self.stop.raise();
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn renderer(&self) -> &SlabRenderer {
        &self.renderer
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Seconds of real time not yet consumed by a fixed update.
    pub fn unprocessed(&self) -> f64 {
        self.unprocessed
    }

    pub fn frame_cap(&self) -> f64 {
        self.frame_cap
    }

    /// Run one iteration: measure time, catch up in fixed steps, then either
    /// render and present or idle.
    pub fn advance(&mut self) -> Result<Iteration, PresentError> {
        let elapsed = self.clock.elapsed_secs();
        self.unprocessed += elapsed;

        let dt = self.frame_cap as f32;
        let mut updates = 0u32;
        while self.unprocessed >= self.frame_cap {
            self.unprocessed -= self.frame_cap;
            let mut input = self.input.lock();
            self.world.update(dt, &input);
            input.snapshot();
            updates += 1;
        }
        debug_assert!(self.unprocessed < self.frame_cap);

        self.stats.iterations += 1;
        self.stats.ticks += u64::from(updates);

        let rendered = updates > 0;
        if rendered {
            let render = self.renderer.render(&self.world);
            if render.capped_rays > 0 {
                tracing::trace!(capped = render.capped_rays, "rays reached distance cap");
            }
            self.presenter.present(self.renderer.frame())?;
            self.stats.frames += 1;
        } else {
            self.stats.idle_iterations += 1;
            self.clock.idle(IDLE_SLEEP);
        }

        self.record_rate(elapsed, updates, rendered);
        Ok(Iteration { updates, rendered })
    }

    /// Iterate until the stop signal is raised, then close the presenter.
    /// A presentation failure also stops the loop and is returned.
    pub fn run(&mut self) -> Result<LoopStats, PresentError> {
        if self.state == LoopState::Stopped {
            return Ok(self.stats);
        }
        tracing::info!(
            tick_rate = 1.0 / self.frame_cap,
            width = self.renderer.frame().width(),
            height = self.renderer.frame().height(),
            "game loop started"
        );

        let result = loop {
            self.presenter.poll_events();
            if self.stop.is_raised() {
                break Ok(());
            }
            if let Err(e) = self.advance() {
                tracing::error!("presentation failed: {e}");
                break Err(e);
            }
        };

        self.state = LoopState::Stopped;
        self.presenter.close();
        tracing::info!(
            ticks = self.stats.ticks,
            frames = self.stats.frames,
            "game loop stopped"
        );
        result.map(|()| self.stats)
    }

    fn record_rate(&mut self, elapsed: f64, updates: u32, rendered: bool) {
        self.window.elapsed += elapsed;
        self.window.ticks += u64::from(updates);
        self.window.frames += u64::from(rendered);
        if self.window.elapsed >= 1.0 {
            let w = std::mem::take(&mut self.window);
            tracing::debug!(
                tps = w.ticks as f64 / w.elapsed,
                fps = w.frames as f64 / w.elapsed,
                "loop rate"
            );
        }
    }
}
