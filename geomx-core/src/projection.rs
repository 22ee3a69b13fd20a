//! Camera and projection utilities

use crate::config::CameraConfig;
use nalgebra::{Matrix4, Point3, Vector3};

/// Drawing-area dimensions after the zero-size fallback has been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Accept measured container bounds, substituting `fallback` for any
    /// dimension that is zero, negative or not finite
    pub fn from_bounds(width: f64, height: f64, fallback: (u32, u32)) -> Self {
        let pick = |measured: f64, default: u32| {
            if measured.is_finite() && measured >= 1.0 {
                measured.round() as u32
            } else {
                default
            }
        };
        Self {
            width: pick(width, fallback.0),
            height: pick(height, fallback.1),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Perspective camera with an explicitly refreshed projection
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Matrix4<f32>,
}

impl Camera {
    pub fn new(config: &CameraConfig, viewport: Viewport) -> Self {
        let mut camera = Self {
            position: config.position,
            target: config.target,
            up: config.up,
            fov: config.fov_degrees.to_radians(),
            aspect: viewport.aspect(),
            near: config.near,
            far: config.far,
            projection: Matrix4::identity(),
        };
        camera.update_projection_matrix();
        camera
    }

    /// Recompute the cached projection after changing fov, aspect or clip planes
    pub fn update_projection_matrix(&mut self) {
        self.projection = Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far);
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// The projection as of the last `update_projection_matrix` call
    pub fn projection_matrix(&self) -> &Matrix4<f32> {
        &self.projection
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraConfig::default(), Viewport { width: 800, height: 600 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::default();
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!((camera.fov - 75f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.position, Point3::new(3.0, 2.0, 4.0));
    }

    #[test]
    fn test_projection_refreshes_only_on_update() {
        let mut camera = Camera::default();
        let before = *camera.projection_matrix();

        camera.aspect = 2.0;
        assert_eq!(*camera.projection_matrix(), before);

        camera.update_projection_matrix();
        let expected = Matrix4::new_perspective(2.0, camera.fov, camera.near, camera.far);
        assert!((camera.projection_matrix() - expected).norm() < 1e-6);
    }

    #[test]
    fn test_target_projects_to_center() {
        let camera = Camera::default();
        let clip = camera.view_projection() * Point3::origin().to_homogeneous();
        assert!(clip.w > 0.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
    }

    #[test]
    fn test_viewport_fallback() {
        assert_eq!(
            Viewport::from_bounds(0.0, 0.0, (800, 600)),
            Viewport { width: 800, height: 600 }
        );
        assert_eq!(
            Viewport::from_bounds(1024.0, f64::NAN, (800, 600)),
            Viewport { width: 1024, height: 600 }
        );
        assert_eq!(
            Viewport::from_bounds(400.4, 299.6, (800, 600)),
            Viewport { width: 400, height: 300 }
        );
    }
}
