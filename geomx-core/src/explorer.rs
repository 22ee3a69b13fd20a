//! The embeddable viewer: state bridge, scene manager and render loop wired together.

use crate::backend::{Container, FrameScheduler, RenderBackend};
use crate::config::ViewerConfig;
use crate::error::Result;
use crate::lifecycle::SceneManager;
use crate::projection::Viewport;
use crate::render_loop::RenderLoop;
use crate::state::{SceneCommand, StateBridge, ViewAction, ViewState};
use crate::storage::KeyValueStore;

pub struct Explorer<B, C, F>
where
    B: RenderBackend,
    C: Container<Surface = B::Surface>,
    F: FrameScheduler,
{
    bridge: StateBridge,
    scene: SceneManager<B, C>,
    frames: RenderLoop<F>,
}

impl<B, C, F> Explorer<B, C, F>
where
    B: RenderBackend,
    C: Container<Surface = B::Surface>,
    F: FrameScheduler,
{
    pub fn new(config: ViewerConfig, store: Box<dyn KeyValueStore>, scheduler: F) -> Self {
        let bridge = StateBridge::new(store);
        let frames = RenderLoop::new(scheduler, bridge.state().clone(), config.rotation_step);
        Self {
            bridge,
            scene: SceneManager::new(config),
            frames,
        }
    }

    pub fn view(&self) -> ViewState {
        self.bridge.view()
    }

    pub fn bridge(&self) -> &StateBridge {
        &self.bridge
    }

    pub fn scene(&self) -> &SceneManager<B, C> {
        &self.scene
    }

    pub fn render_loop(&self) -> &RenderLoop<F> {
        &self.frames
    }

    pub fn render_loop_mut(&mut self) -> &mut RenderLoop<F> {
        &mut self.frames
    }

    /// Build the scene in `container` and start drawing
    pub fn mount<M>(&mut self, container: C, make_renderer: M) -> Result<()>
    where
        M: FnOnce(Viewport) -> Result<B>,
    {
        self.frames.stop();
        self.scene.mount(container, self.bridge.view(), make_renderer)?;
        self.frames.start();
        Ok(())
    }

    pub fn dispatch(&mut self, action: ViewAction) {
        match self.bridge.apply(action) {
            Some(SceneCommand::SetWireframe(enabled)) => self.scene.set_wireframe(enabled),
            Some(SceneCommand::SetShape(id)) => {
                self.scene.set_shape(id, self.bridge.view().wireframe);
            }
            None => {}
        }
    }

    /// Frame callback entry point
    pub fn frame(&mut self) -> bool {
        self.frames.run_frame(&mut self.scene)
    }

    /// Resize notification entry point; no-op once unmounted
    pub fn handle_resize(&mut self) {
        self.scene.fit_to_container();
    }

    /// Stop the loop first, then release the scene
    pub fn unmount(&mut self) {
        self.frames.stop();
        self.scene.unmount();
    }
}

impl<B, C, F> Drop for Explorer<B, C, F>
where
    B: RenderBackend,
    C: Container<Surface = B::Surface>,
    F: FrameScheduler,
{
    fn drop(&mut self) {
        self.unmount();
    }
}
