//! Self-rescheduling frame driver.

use crate::backend::{Container, FrameScheduler, RenderBackend};
use crate::lifecycle::SceneManager;
use crate::state::SharedViewState;

pub struct RenderLoop<F: FrameScheduler> {
    scheduler: F,
    state: SharedViewState,
    /// Rotation increment on (x, y) per frame
    step: (f32, f32),
    running: bool,
    pending: Option<F::Token>,
    frames: u64,
}

impl<F: FrameScheduler> RenderLoop<F> {
    pub fn new(scheduler: F, state: SharedViewState, step: (f32, f32)) -> Self {
        Self {
            scheduler,
            state,
            step,
            running: false,
            pending: None,
            frames: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Iterations executed since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.schedule_next();
    }

    /// Cancel the queued frame. A callback that was already queued will
    /// find the loop stopped and return without drawing.
    pub fn stop(&mut self) {
        self.running = false;
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel_frame(token);
        }
    }

    /// Body of one frame callback. Returns `false` if the loop is stopped.
    pub fn run_frame<B, C>(&mut self, scene: &mut SceneManager<B, C>) -> bool
    where
        B: RenderBackend,
        C: Container<Surface = B::Surface>,
    {
        if !self.running {
            return false;
        }
        self.pending = None;
        self.schedule_next();

        if self.state.get().auto_rotate {
            scene.rotate_mesh(self.step.0, self.step.1);
        }
        scene.render();
        self.frames += 1;
        true
    }

    fn schedule_next(&mut self) {
        match self.scheduler.request_frame() {
            Ok(token) => self.pending = Some(token),
            Err(err) => {
                log::error!("stopping render loop: {}", err);
                self.running = false;
            }
        }
    }
}
