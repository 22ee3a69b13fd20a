//! Viewer tunables shared by every host.

use crate::color::Color;
use nalgebra::{Point3, Vector3};

/// Static scene setup applied on every mount
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Size used when the container reports a zero or non-finite dimension
    pub fallback_size: (u32, u32),
    pub background: Color,
    pub camera: CameraConfig,
    pub ambient_light: (Color, f32),
    /// Colour, intensity and position of the directional light
    pub directional_light: (Color, f32, Point3<f32>),
    pub axes_size: f32,
    pub grid_size: f32,
    pub grid_divisions: u32,
    /// Per-frame rotation increment on (x, y), in radians
    pub rotation_step: (f32, f32),
}

#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: Point3::new(3.0, 2.0, 4.0),
            target: Point3::origin(),
            up: Vector3::y(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fallback_size: (800, 600),
            background: Color::from_hex(0x0a0a0a),
            camera: CameraConfig::default(),
            ambient_light: (Color::WHITE, 0.4),
            directional_light: (Color::WHITE, 0.8, Point3::new(5.0, 5.0, 5.0)),
            axes_size: 2.0,
            grid_size: 10.0,
            grid_divisions: 10,
            rotation_step: (0.01, 0.015),
        }
    }
}
