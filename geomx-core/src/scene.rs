//! Scene graph: lights, reference helpers and at most one mesh.

use crate::color::Color;
use crate::material::Material;
use crate::resources::{GeometryId, MaterialId};
use crate::transform::RotationState;
use nalgebra::Point3;

#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Ambient {
        color: Color,
        intensity: f32,
    },
    /// Shines from `position` towards the origin
    Directional {
        color: Color,
        intensity: f32,
        position: Point3<f32>,
    },
}

/// Static reference geometry drawn as lines
#[derive(Debug, Clone, PartialEq)]
pub enum Helper {
    /// Red X, green Y and blue Z axes of the given length
    Axes { size: f32 },
    /// Square grid on the XZ plane
    Grid { size: f32, divisions: u32 },
}

/// The renderable primitive: backend handles plus the CPU-side material and orientation
#[derive(Debug, Clone)]
pub struct MeshObject {
    pub shape_id: &'static str,
    pub geometry: GeometryId,
    pub material: MaterialId,
    pub material_data: Material,
    pub rotation: RotationState,
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub background: Color,
    lights: Vec<Light>,
    helpers: Vec<Helper>,
    mesh: Option<MeshObject>,
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            lights: Vec::new(),
            helpers: Vec::new(),
            mesh: None,
        }
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn add_helper(&mut self, helper: Helper) {
        self.helpers.push(helper);
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn helpers(&self) -> &[Helper] {
        &self.helpers
    }

    pub fn mesh(&self) -> Option<&MeshObject> {
        self.mesh.as_ref()
    }

    pub fn mesh_mut(&mut self) -> Option<&mut MeshObject> {
        self.mesh.as_mut()
    }

    /// Install `mesh` as the only primitive, handing back the one it replaces
    pub fn replace_mesh(&mut self, mesh: MeshObject) -> Option<MeshObject> {
        self.mesh.replace(mesh)
    }

    pub fn take_mesh(&mut self) -> Option<MeshObject> {
        self.mesh.take()
    }

    /// Total number of objects in the graph
    pub fn object_count(&self) -> usize {
        self.lights.len() + self.helpers.len() + usize::from(self.mesh.is_some())
    }

    /// Remove lights and helpers; the mesh must be taken first so its
    /// resources can be released
    pub fn clear(&mut self) {
        debug_assert!(self.mesh.is_none(), "mesh resources must be released before clear");
        self.lights.clear();
        self.helpers.clear();
        self.mesh = None;
    }
}
