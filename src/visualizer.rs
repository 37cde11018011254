use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::animation::AnimationController;
use crate::fps::FpsSummary;
use crate::fps::FpsTracker;
use crate::frame::Clock;
use crate::frame::FrameHandle;
use crate::frame::Scheduler;
use crate::render::GridRenderer;
use crate::surface::Surface;
use crate::universe::Universe;

/// Ties a universe to a surface: runs animation frames and redraws on demand.
pub struct Visualizer<U, S, Q, C> {
    universe: U,
    surface: S,
    renderer: GridRenderer,
    fps: FpsTracker,
    animation: AnimationController,
    scheduler: Q,
    clock: C,
}

impl<U, S, Q, C> Visualizer<U, S, Q, C>
where
    U: Universe,
    S: Surface,
    Q: Scheduler,
    C: Clock,
{
    /// The animation starts stopped.
    pub fn new(universe: U, surface: S, renderer: GridRenderer, scheduler: Q, clock: C) -> Self {
        let fps = FpsTracker::new(clock.now());

        Self {
            universe,
            surface,
            renderer,
            fps,
            animation: AnimationController::new(),
            scheduler,
            clock,
        }
    }

    pub fn universe(&self) -> &U {
        &self.universe
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn renderer(&self) -> &GridRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut GridRenderer {
        &mut self.renderer
    }

    pub fn scheduler(&self) -> &Q {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Q {
        &mut self.scheduler
    }

    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }

    /// Glyph for the play/pause control
    pub fn glyph(&self) -> &'static str {
        self.animation.glyph()
    }

    pub fn fps(&self) -> FpsSummary {
        self.fps.summary()
    }

    pub fn play(&mut self) -> bool {
        self.animation.play(&mut self.scheduler)
    }

    pub fn pause(&mut self) -> bool {
        self.animation.pause(&mut self.scheduler)
    }

    pub fn toggle_animation(&mut self) {
        self.animation.toggle(&mut self.scheduler);
    }

    /// Runs one animation frame: sample the frame rate, advance the universe, redraw, then
    /// schedule the next frame.
    pub fn run_frame(&mut self, handle: FrameHandle) {
        if !self.animation.owns(handle) {
            warn!(?handle, "ignoring stale frame");
            return;
        }

        let summary = self.fps.sample(self.clock.now());
        trace!(fps = summary.latest, "frame");

        self.universe.tick();
        self.redraw();

        self.animation.schedule_next(&mut self.scheduler);
    }

    /// Draws grid lines and cells, outside of the animation cadence.
    pub fn redraw(&mut self) {
        let dims = self.universe.dimensions();

        // the universe may have moved its cells since the last draw
        let cells = self.universe.cell_buffer();

        self.renderer.draw_grid(&mut self.surface, dims);
        self.renderer.draw_cells(&mut self.surface, dims, &cells);
    }

    /// Flips one cell and redraws right away, whether or not the animation runs.
    pub fn toggle_cell(&mut self, row: u32, col: u32) {
        debug!(row, col, "toggle cell");

        self.universe.toggle_cell(row, col);
        self.redraw();
    }
}
