//! Seams between the platform-free core and each host.

use crate::error::Result;
use crate::geometry::Geometry;
use crate::material::Material;
use crate::projection::Camera;
use crate::resources::{GeometryId, MaterialId};
use crate::scene::Scene;

/// A drawing backend bound to one output surface
pub trait RenderBackend {
    type Surface;

    fn surface(&self) -> &Self::Surface;

    /// Resize the output to `width` x `height` logical pixels
    fn set_size(&mut self, width: u32, height: u32);

    /// Logical output size as of the last `set_size`
    fn size(&self) -> (u32, u32);

    fn set_pixel_ratio(&mut self, ratio: f64);

    fn create_geometry(&mut self, geometry: Geometry) -> GeometryId;
    fn dispose_geometry(&mut self, id: GeometryId);

    fn create_material(&mut self, material: &Material) -> MaterialId;
    fn update_material(&mut self, id: MaterialId, material: &Material);
    fn dispose_material(&mut self, id: MaterialId);

    /// Draw one frame of `scene` as seen from `camera`
    fn render(&mut self, scene: &Scene, camera: &Camera);

    /// Release everything the backend holds; later calls become no-ops
    fn dispose(&mut self);
}

/// Where the drawing surface lives, e.g. a DOM element or the terminal
pub trait Container {
    type Surface;

    /// Current bounding box; may be zero before layout
    fn size(&self) -> (f64, f64);

    fn pixel_ratio(&self) -> f64 {
        1.0
    }

    fn attach(&self, surface: &Self::Surface) -> Result<()>;
    fn detach(&self, surface: &Self::Surface) -> Result<()>;
    fn contains(&self, surface: &Self::Surface) -> bool;
}

/// One-shot frame requests, e.g. `requestAnimationFrame`
pub trait FrameScheduler {
    type Token: Copy;

    fn request_frame(&mut self) -> Result<Self::Token>;
    fn cancel_frame(&mut self, token: Self::Token);
}
