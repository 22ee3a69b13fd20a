//! Scene lifecycle: one rendering context per mount, one mesh per shape.
//!
//! Lights, helpers, camera and renderer are built once in [`SceneManager::mount`]
//! and torn down once in [`SceneManager::unmount`]. Shape changes only swap
//! the mesh, releasing the old geometry and material before creating the new
//! ones.

use crate::backend::{Container, RenderBackend};
use crate::catalog::Catalog;
use crate::config::ViewerConfig;
use crate::error::Result;
use crate::material::Material;
use crate::projection::{Camera, Viewport};
use crate::scene::{Helper, Light, MeshObject, Scene};
use crate::state::ViewState;
use crate::transform::RotationState;

struct SceneContext<B> {
    scene: Scene,
    camera: Camera,
    /// `None` while mounting or when the backend could not be created
    renderer: Option<B>,
}

pub struct SceneManager<B, C>
where
    B: RenderBackend,
    C: Container<Surface = B::Surface>,
{
    config: ViewerConfig,
    context: Option<SceneContext<B>>,
    container: Option<C>,
}

impl<B, C> SceneManager<B, C>
where
    B: RenderBackend,
    C: Container<Surface = B::Surface>,
{
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            context: None,
            container: None,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.context.is_some()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.context.as_ref().map(|ctx| &ctx.scene)
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.context.as_ref().map(|ctx| &ctx.camera)
    }

    pub fn renderer(&self) -> Option<&B> {
        self.context.as_ref().and_then(|ctx| ctx.renderer.as_ref())
    }

    pub fn mesh(&self) -> Option<&MeshObject> {
        self.scene().and_then(Scene::mesh)
    }

    pub fn container(&self) -> Option<&C> {
        self.container.as_ref()
    }

    /// Build the rendering context inside `container` and show `view`'s shape.
    ///
    /// On error the partial context is kept so [`unmount`](Self::unmount)
    /// can release whatever was created.
    pub fn mount<F>(&mut self, container: C, view: ViewState, make_renderer: F) -> Result<()>
    where
        F: FnOnce(Viewport) -> Result<B>,
    {
        if self.is_mounted() {
            log::debug!("re-mounting; tearing down previous context");
            self.unmount();
        }

        let (width, height) = container.size();
        let viewport = Viewport::from_bounds(width, height, self.config.fallback_size);
        log::info!("mounting scene at {}x{}", viewport.width, viewport.height);

        let mut scene = Scene::new(self.config.background);
        let (ambient_color, ambient_intensity) = self.config.ambient_light;
        scene.add_light(Light::Ambient {
            color: ambient_color,
            intensity: ambient_intensity,
        });
        let (color, intensity, position) = self.config.directional_light;
        scene.add_light(Light::Directional {
            color,
            intensity,
            position,
        });
        scene.add_helper(Helper::Axes {
            size: self.config.axes_size,
        });
        scene.add_helper(Helper::Grid {
            size: self.config.grid_size,
            divisions: self.config.grid_divisions,
        });

        let pixel_ratio = container.pixel_ratio();
        self.context = Some(SceneContext {
            scene,
            camera: Camera::new(&self.config.camera, viewport),
            renderer: None,
        });
        self.container = Some(container);

        let mut renderer = make_renderer(viewport)?;
        renderer.set_pixel_ratio(pixel_ratio);
        renderer.set_size(viewport.width, viewport.height);
        if let Some(ctx) = self.context.as_mut() {
            ctx.renderer = Some(renderer);
        }

        self.set_shape(view.selected_shape, view.wireframe);

        if let (Some(container), Some(renderer)) = (self.container.as_ref(), self.renderer()) {
            container.attach(renderer.surface())?;
        }
        Ok(())
    }

    /// Replace the mesh with the catalog shape `id`.
    ///
    /// Returns `false` and leaves the scene untouched for unknown ids or
    /// when nothing is mounted.
    pub fn set_shape(&mut self, id: &str, wireframe: bool) -> bool {
        let Some(shape) = Catalog::get(id) else {
            log::warn!("unknown shape {:?}; keeping current mesh", id);
            return false;
        };
        let Some(SceneContext {
            scene,
            renderer: Some(renderer),
            ..
        }) = self.context.as_mut()
        else {
            return false;
        };

        if let Some(old) = scene.take_mesh() {
            renderer.dispose_geometry(old.geometry);
            renderer.dispose_material(old.material);
        }

        let material = Material::new(shape.color(), wireframe);
        let mesh = MeshObject {
            shape_id: shape.id,
            geometry: renderer.create_geometry((shape.build)()),
            material: renderer.create_material(&material),
            material_data: material,
            rotation: RotationState::zero(),
        };
        scene.replace_mesh(mesh);
        log::debug!("showing {}", shape.id);
        true
    }

    /// Flip the current material's wireframe flag without reallocating
    pub fn set_wireframe(&mut self, enabled: bool) {
        if let Some(mesh) = self.context.as_mut().and_then(|ctx| ctx.scene.mesh_mut()) {
            mesh.material_data.set_wireframe(enabled);
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        let viewport = Viewport::from_bounds(width, height, self.config.fallback_size);
        let Some(ctx) = self.context.as_mut() else {
            return;
        };
        ctx.camera.aspect = viewport.aspect();
        ctx.camera.update_projection_matrix();
        if let Some(renderer) = ctx.renderer.as_mut() {
            renderer.set_size(viewport.width, viewport.height);
        }
    }

    /// Measure the container and resize to it
    pub fn fit_to_container(&mut self) {
        if let Some((width, height)) = self.container.as_ref().map(Container::size) {
            self.resize(width, height);
        }
    }

    pub fn rotate_mesh(&mut self, dx: f32, dy: f32) {
        if let Some(mesh) = self.context.as_mut().and_then(|ctx| ctx.scene.mesh_mut()) {
            mesh.rotation.rotate(dx, dy, 0.0);
        }
    }

    /// Push a dirty material to the backend, then draw one frame
    pub fn render(&mut self) {
        let Some(SceneContext {
            scene,
            camera,
            renderer: Some(renderer),
        }) = self.context.as_mut()
        else {
            return;
        };

        if let Some(mesh) = scene.mesh_mut() {
            if mesh.material_data.needs_update {
                renderer.update_material(mesh.material, &mesh.material_data);
                mesh.material_data.needs_update = false;
            }
        }
        renderer.render(scene, camera);
    }

    /// Release everything built by `mount`. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        let container = self.container.take();
        let Some(mut ctx) = self.context.take() else {
            return;
        };

        let mesh = ctx.scene.take_mesh();
        if let Some(mut renderer) = ctx.renderer.take() {
            if let Some(container) = container.as_ref() {
                if container.contains(renderer.surface()) {
                    if let Err(err) = container.detach(renderer.surface()) {
                        log::warn!("failed to detach drawing surface: {}", err);
                    }
                }
            }
            if let Some(mesh) = mesh {
                renderer.dispose_geometry(mesh.geometry);
                renderer.dispose_material(mesh.material);
            }
            renderer.dispose();
        }
        ctx.scene.clear();
        log::info!("scene unmounted");
    }
}

impl<B, C> Drop for SceneManager<B, C>
where
    B: RenderBackend,
    C: Container<Surface = B::Surface>,
{
    fn drop(&mut self) {
        self.unmount();
    }
}
