//! Backend-side storage for uploaded geometries and materials.
//!
//! Backends embed a [`ResourcePool`] and hand out ids from it; the lifecycle
//! manager owns those ids and must return each one exactly once.

use crate::geometry::{Geometry, Triangle};
use crate::material::Material;
use nalgebra::Point3;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(u64);

/// Geometry in the form renderers draw from
#[derive(Debug, Clone)]
pub struct PreparedGeometry {
    pub triangles: Vec<Triangle>,
    pub edges: Vec<[Point3<f32>; 2]>,
}

impl From<Geometry> for PreparedGeometry {
    fn from(geometry: Geometry) -> Self {
        let edges = geometry.edges();
        Self {
            triangles: geometry.triangles,
            edges,
        }
    }
}

#[derive(Debug, Default)]
pub struct ResourcePool {
    next_id: u64,
    geometries: HashMap<GeometryId, PreparedGeometry>,
    materials: HashMap<MaterialId, Material>,
}

impl ResourcePool {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn insert_geometry(&mut self, geometry: Geometry) -> GeometryId {
        let id = GeometryId(self.allocate_id());
        self.geometries.insert(id, PreparedGeometry::from(geometry));
        id
    }

    /// Returns `false` if the id was unknown or already released
    pub fn remove_geometry(&mut self, id: GeometryId) -> bool {
        self.geometries.remove(&id).is_some()
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&PreparedGeometry> {
        self.geometries.get(&id)
    }

    pub fn insert_material(&mut self, material: &Material) -> MaterialId {
        let id = MaterialId(self.allocate_id());
        let mut stored = material.clone();
        stored.needs_update = false;
        self.materials.insert(id, stored);
        id
    }

    /// Overwrite a stored material; unknown ids are ignored
    pub fn update_material(&mut self, id: MaterialId, material: &Material) -> bool {
        match self.materials.get_mut(&id) {
            Some(stored) => {
                *stored = material.clone();
                stored.needs_update = false;
                true
            }
            None => false,
        }
    }

    pub fn remove_material(&mut self, id: MaterialId) -> bool {
        self.materials.remove(&id).is_some()
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(&id)
    }

    pub fn live_geometries(&self) -> usize {
        self.geometries.len()
    }

    pub fn live_materials(&self) -> usize {
        self.materials.len()
    }

    /// Drop everything still held; returns how many entries were leaked
    pub fn clear(&mut self) -> usize {
        let leaked = self.geometries.len() + self.materials.len();
        self.geometries.clear();
        self.materials.clear();
        leaked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::primitives;

    #[test]
    fn test_ids_are_never_reused() {
        let mut pool = ResourcePool::new();
        let first = pool.insert_geometry(primitives::tetrahedron(1.0));
        assert!(pool.remove_geometry(first));
        let second = pool.insert_geometry(primitives::tetrahedron(1.0));
        assert_ne!(first, second);
        assert!(!pool.remove_geometry(first));
        assert_eq!(pool.live_geometries(), 1);
    }

    #[test]
    fn test_material_update_clears_dirty_flag() {
        let mut pool = ResourcePool::new();
        let mut material = Material::new(Color::WHITE, false);
        let id = pool.insert_material(&material);

        material.set_wireframe(true);
        assert!(material.needs_update);
        assert!(pool.update_material(id, &material));

        let stored = pool.material(id).unwrap();
        assert!(stored.wireframe);
        assert!(!stored.needs_update);
    }

    #[test]
    fn test_prepared_geometry_carries_edges() {
        let mut pool = ResourcePool::new();
        let id = pool.insert_geometry(primitives::octahedron(1.0));
        let prepared = pool.geometry(id).unwrap();
        assert_eq!(prepared.triangles.len(), 8);
        assert_eq!(prepared.edges.len(), 12);
        assert_eq!(pool.clear(), 1);
    }
}
