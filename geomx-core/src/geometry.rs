//! Geometry primitives for 3D rendering

use nalgebra::{Point3, Vector3};
use std::collections::HashSet;

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    /// Surface normal used for lighting; curved shapes store the smooth one
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn at(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Build a flat-shaded triangle whose vertex normals all equal the face normal
    pub fn flat(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        let normal = (b - a).cross(&(c - a)).normalize();
        Self::new(Vertex::at(a, normal), Vertex::at(b, normal), Vertex::at(c, normal))
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }

    /// Mean of the vertex normals, falling back to the face normal when
    /// they cancel out
    pub fn shading_normal(&self) -> Vector3<f32> {
        let [a, b, c] = &self.vertices;
        (a.normal + b.normal + c.normal)
            .try_normalize(1e-6)
            .unwrap_or_else(|| self.calculate_normal())
    }

    pub fn area(&self) -> f32 {
        let [a, b, c] = &self.vertices;
        (b.position - a.position).cross(&(c.position - a.position)).norm() * 0.5
    }

    pub fn centroid(&self) -> Point3<f32> {
        let [a, b, c] = &self.vertices;
        Point3::from((a.position.coords + b.position.coords + c.position.coords) / 3.0)
    }
}

/// An unindexed triangle list describing one tessellated shape
#[derive(Debug, Clone)]
pub struct Geometry {
    pub triangles: Vec<Triangle>,
}

/// Quantisation used when matching shared edges between triangles
const EDGE_EPSILON: f32 = 1e-4;

type EdgeKey = ((i64, i64, i64), (i64, i64, i64));

fn quantize(p: &Point3<f32>) -> (i64, i64, i64) {
    let q = |v: f32| (v / EDGE_EPSILON).round() as i64;
    (q(p.x), q(p.y), q(p.z))
}

impl Geometry {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Push a triangle unless it collapses to a line or a point
    pub fn push_nondegenerate(&mut self, triangle: Triangle) {
        if triangle.area() > 1e-9 {
            self.triangles.push(triangle);
        }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Largest distance from the origin to any vertex
    pub fn bounding_radius(&self) -> f32 {
        self.triangles
            .iter()
            .flat_map(|t| t.vertices.iter())
            .map(|v| v.position.coords.norm())
            .fold(0.0, f32::max)
    }

    /// Unique triangle edges, shared edges reported once
    pub fn edges(&self) -> Vec<[Point3<f32>; 2]> {
        let mut seen: HashSet<EdgeKey> = HashSet::new();
        let mut edges = Vec::new();

        for triangle in &self.triangles {
            for i in 0..3 {
                let a = triangle.vertices[i].position;
                let b = triangle.vertices[(i + 1) % 3].position;
                let (ka, kb) = (quantize(&a), quantize(&b));
                let key = if ka <= kb { (ka, kb) } else { (kb, ka) };
                if seen.insert(key) {
                    edges.push([a, b]);
                }
            }
        }

        edges
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}
