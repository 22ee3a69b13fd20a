//! Projection and flat shading shared by the software backends.
//!
//! [`build_draw_list`] turns a scene into screen-space primitives: helper
//! lines, lit triangles sorted back to front, or wireframe edges. Backends
//! only have to paint what it returns.

use crate::color::Color;
use crate::projection::Camera;
use crate::resources::ResourcePool;
use crate::scene::{Helper, Light, Scene};
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

const AXIS_COLORS: [u32; 3] = [0xff0000, 0x00ff00, 0x0000ff];
const GRID_COLOR: u32 = 0x444444;
const GRID_CENTER_COLOR: u32 = 0x888888;

/// A projected point: pixel coordinates plus NDC depth (-1 near, 1 far)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenLine {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenFace {
    pub points: [ScreenPoint; 3],
    /// Surface colour after lighting
    pub color: Color,
    /// Lambert term in 0..1 before colour is applied
    pub brightness: f32,
}

impl ScreenFace {
    pub fn depth(&self) -> f32 {
        self.points.iter().map(|p| p.depth).sum::<f32>() / 3.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub background: Color,
    /// Grid and axes
    pub helpers: Vec<ScreenLine>,
    /// Filled mesh faces, farthest first
    pub faces: Vec<ScreenFace>,
    /// Mesh edges when the material is in wireframe mode
    pub edges: Vec<ScreenLine>,
}

/// Clip-space transform of a single output surface
struct Projector {
    mvp: Matrix4<f32>,
    near: f32,
    width: f32,
    height: f32,
}

impl Projector {
    fn clip(&self, point: &Point3<f32>) -> Vector4<f32> {
        self.mvp * point.to_homogeneous()
    }

    fn to_screen(&self, clip: &Vector4<f32>) -> ScreenPoint {
        let ndc = clip.xyz() / clip.w;
        ScreenPoint {
            x: (ndc.x + 1.0) * 0.5 * self.width,
            y: (1.0 - ndc.y) * 0.5 * self.height,
            depth: ndc.z,
        }
    }

    /// Project a point, rejecting anything in front of the near plane
    fn project(&self, point: &Point3<f32>) -> Option<ScreenPoint> {
        let clip = self.clip(point);
        (clip.w >= self.near).then(|| self.to_screen(&clip))
    }

    /// Project a segment, trimming the part that crosses behind the camera
    fn project_segment(&self, a: &Point3<f32>, b: &Point3<f32>) -> Option<(ScreenPoint, ScreenPoint)> {
        let (mut ca, mut cb) = (self.clip(a), self.clip(b));
        match (ca.w >= self.near, cb.w >= self.near) {
            (false, false) => return None,
            (true, true) => {}
            (a_visible, _) => {
                let t = (self.near - ca.w) / (cb.w - ca.w);
                let cut = ca + (cb - ca) * t;
                if a_visible {
                    cb = cut;
                } else {
                    ca = cut;
                }
            }
        }
        Some((self.to_screen(&ca), self.to_screen(&cb)))
    }
}

/// Light arriving at a surface with the given world-space normal
fn irradiance(lights: &[Light], normal: &Vector3<f32>) -> (Color, f32) {
    let mut total = Color::BLACK;
    let mut lambert = 0.0;
    for light in lights {
        let (color, factor) = match light {
            Light::Ambient { color, intensity } => (*color, *intensity),
            Light::Directional {
                color,
                intensity,
                position,
            } => {
                let facing = normal.dot(&position.coords.normalize()).max(0.0);
                lambert += facing;
                (*color, intensity * facing)
            }
        };
        total = Color::new(
            total.r + color.r * factor,
            total.g + color.g * factor,
            total.b + color.b * factor,
        );
    }
    (total, lambert.min(1.0))
}

/// World-space line segments for a helper object
pub fn helper_segments(helper: &Helper) -> Vec<([Point3<f32>; 2], Color)> {
    match *helper {
        Helper::Axes { size } => [Vector3::x(), Vector3::y(), Vector3::z()]
            .into_iter()
            .zip(AXIS_COLORS)
            .map(|(axis, hex)| ([Point3::origin(), Point3::from(axis * size)], Color::from_hex(hex)))
            .collect(),
        Helper::Grid { size, divisions } => {
            let divisions = divisions.max(1);
            let half = size / 2.0;
            let step = size / divisions as f32;
            let mut segments = Vec::with_capacity((divisions as usize + 1) * 2);
            for i in 0..=divisions {
                let k = -half + i as f32 * step;
                let hex = if i * 2 == divisions { GRID_CENTER_COLOR } else { GRID_COLOR };
                let color = Color::from_hex(hex);
                segments.push(([Point3::new(-half, 0.0, k), Point3::new(half, 0.0, k)], color));
                segments.push(([Point3::new(k, 0.0, -half), Point3::new(k, 0.0, half)], color));
            }
            segments
        }
    }
}

/// Project `scene` onto a `width` x `height` pixel surface
pub fn build_draw_list(
    scene: &Scene,
    camera: &Camera,
    pool: &ResourcePool,
    width: u32,
    height: u32,
) -> DrawList {
    let view_projection = camera.view_projection();
    let mut list = DrawList {
        background: scene.background,
        ..DrawList::default()
    };

    let world = Projector {
        mvp: view_projection,
        near: camera.near,
        width: width as f32,
        height: height as f32,
    };
    for helper in scene.helpers() {
        for ([a, b], color) in helper_segments(helper) {
            if let Some((from, to)) = world.project_segment(&a, &b) {
                list.helpers.push(ScreenLine { from, to, color });
            }
        }
    }

    let Some(mesh) = scene.mesh() else {
        return list;
    };
    let (Some(geometry), Some(material)) = (pool.geometry(mesh.geometry), pool.material(mesh.material))
    else {
        log::warn!("mesh {} references released resources", mesh.shape_id);
        return list;
    };

    let model = mesh.rotation.matrix();
    let object = Projector {
        mvp: view_projection * model,
        ..world
    };

    if material.wireframe {
        for [a, b] in &geometry.edges {
            if let Some((from, to)) = object.project_segment(a, b) {
                list.edges.push(ScreenLine {
                    from,
                    to,
                    color: material.color,
                });
            }
        }
        return list;
    }

    for triangle in &geometry.triangles {
        let facing = model.transform_vector(&triangle.calculate_normal());
        let centroid = model.transform_point(&triangle.centroid());
        if facing.dot(&(centroid - camera.position)) >= 0.0 {
            continue; // back face
        }

        let [a, b, c] = &triangle.vertices;
        let (Some(pa), Some(pb), Some(pc)) = (
            object.project(&a.position),
            object.project(&b.position),
            object.project(&c.position),
        ) else {
            continue;
        };

        let normal = model.transform_vector(&triangle.shading_normal());
        let (light, brightness) = irradiance(scene.lights(), &normal);
        list.faces.push(ScreenFace {
            points: [pa, pb, pc],
            color: material.color.tint(light),
            brightness,
        });
    }

    list.faces.sort_by(|a, b| b.depth().total_cmp(&a.depth()));
    list
}
