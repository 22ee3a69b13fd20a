//! Tessellation of the primitive shapes offered by the catalog.
//!
//! Every factory returns an unindexed, outward-wound triangle list centred on
//! the origin. Parameters follow the usual box/sphere/cone/cylinder/torus and
//! regular polyhedron conventions of WebGL scene libraries.

use crate::geometry::{Geometry, Triangle, Vertex};
use nalgebra::{Point3, Vector3};
use std::f32::consts::TAU;

/// Axis-aligned box centred on the origin
pub fn cuboid(width: f32, height: f32, depth: f32) -> Geometry {
    let half = Vector3::new(width / 2.0, height / 2.0, depth / 2.0);
    let (x, y, z) = (Vector3::x(), Vector3::y(), Vector3::z());

    // (normal, u, v) with u x v == normal so both triangles wind outward
    let faces = [
        (x, y, z),
        (-x, z, y),
        (y, z, x),
        (-y, x, z),
        (z, x, y),
        (-z, y, x),
    ];

    let mut geometry = Geometry::with_capacity(12);
    for (normal, u, v) in faces {
        let center = Point3::from(normal.component_mul(&half));
        let u = u.component_mul(&half);
        let v = v.component_mul(&half);

        let corner = |su: f32, sv: f32| Vertex::at(center + u * su + v * sv, normal);
        geometry.add_triangle(Triangle::new(corner(-1.0, -1.0), corner(1.0, -1.0), corner(1.0, 1.0)));
        geometry.add_triangle(Triangle::new(corner(-1.0, -1.0), corner(1.0, 1.0), corner(-1.0, 1.0)));
    }

    geometry
}

/// UV sphere; the pole rows emit a single triangle per segment
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Geometry {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);

    let point = |ix: u32, iy: u32| {
        let phi = ix as f32 / width_segments as f32 * TAU;
        let theta = iy as f32 / height_segments as f32 * std::f32::consts::PI;
        let position = Point3::new(
            -radius * phi.cos() * theta.sin(),
            radius * theta.cos(),
            radius * phi.sin() * theta.sin(),
        );
        Vertex::at(position, position.coords.normalize())
    };

    let mut geometry = Geometry::with_capacity((width_segments * height_segments * 2) as usize);
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = point(ix + 1, iy);
            let b = point(ix, iy);
            let c = point(ix, iy + 1);
            let d = point(ix + 1, iy + 1);

            if iy != 0 {
                geometry.push_nondegenerate(Triangle::new(a, b, d));
            }
            if iy != height_segments - 1 {
                geometry.push_nondegenerate(Triangle::new(b, c, d));
            }
        }
    }

    geometry
}

/// Truncated cone along the Y axis, capped at both ends unless a radius is zero
pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Geometry {
    let radial_segments = radial_segments.max(3);
    let half = height / 2.0;
    let slope = (radius_bottom - radius_top) / height;

    let ring = |radius: f32, y: f32, x: u32| {
        let theta = x as f32 / radial_segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        let normal = Vector3::new(sin, slope, cos).normalize();
        Vertex::at(Point3::new(radius * sin, y, radius * cos), normal)
    };

    let mut geometry = Geometry::with_capacity((radial_segments * 4) as usize);

    // side wall
    for x in 0..radial_segments {
        let a = ring(radius_top, half, x);
        let b = ring(radius_bottom, -half, x);
        let c = ring(radius_bottom, -half, x + 1);
        let d = ring(radius_top, half, x + 1);
        geometry.push_nondegenerate(Triangle::new(a, b, d));
        geometry.push_nondegenerate(Triangle::new(b, c, d));
    }

    if radius_top > 0.0 {
        let up = Vector3::y();
        let center = Vertex::at(Point3::new(0.0, half, 0.0), up);
        for x in 0..radial_segments {
            let p0 = Vertex::at(ring(radius_top, half, x).position, up);
            let p1 = Vertex::at(ring(radius_top, half, x + 1).position, up);
            geometry.push_nondegenerate(Triangle::new(center, p0, p1));
        }
    }

    if radius_bottom > 0.0 {
        let down = -Vector3::y();
        let center = Vertex::at(Point3::new(0.0, -half, 0.0), down);
        for x in 0..radial_segments {
            let p0 = Vertex::at(ring(radius_bottom, -half, x).position, down);
            let p1 = Vertex::at(ring(radius_bottom, -half, x + 1).position, down);
            geometry.push_nondegenerate(Triangle::new(center, p1, p0));
        }
    }

    geometry
}

/// Cone with its apex on +Y and a capped base
pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Geometry {
    cylinder(0.0, radius, height, radial_segments)
}

/// Torus lying in the XY plane
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Geometry {
    let radial_segments = radial_segments.max(3);
    let tubular_segments = tubular_segments.max(3);

    let point = |i: u32, j: u32| {
        let u = i as f32 / tubular_segments as f32 * TAU;
        let v = j as f32 / radial_segments as f32 * TAU;
        let position = Point3::new(
            (radius + tube * v.cos()) * u.cos(),
            (radius + tube * v.cos()) * u.sin(),
            tube * v.sin(),
        );
        let center = Point3::new(radius * u.cos(), radius * u.sin(), 0.0);
        Vertex::at(position, (position - center).normalize())
    };

    let mut geometry = Geometry::with_capacity((radial_segments * tubular_segments * 2) as usize);
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = point(i - 1, j);
            let b = point(i - 1, j - 1);
            let c = point(i, j - 1);
            let d = point(i, j);
            geometry.push_nondegenerate(Triangle::new(a, b, d));
            geometry.push_nondegenerate(Triangle::new(b, c, d));
        }
    }

    geometry
}

/// Flat-shaded polyhedron with every vertex projected onto a sphere of `radius`
fn polyhedron(vertices: &[[f32; 3]], faces: &[[usize; 3]], radius: f32) -> Geometry {
    let points: Vec<Point3<f32>> = vertices
        .iter()
        .map(|&[x, y, z]| Point3::from(Vector3::new(x, y, z).normalize() * radius))
        .collect();

    let mut geometry = Geometry::with_capacity(faces.len());
    for &[a, b, c] in faces {
        geometry.push_nondegenerate(Triangle::flat(points[a], points[b], points[c]));
    }
    geometry
}

pub fn tetrahedron(radius: f32) -> Geometry {
    const VERTICES: [[f32; 3]; 4] = [
        [1.0, 1.0, 1.0],
        [-1.0, -1.0, 1.0],
        [-1.0, 1.0, -1.0],
        [1.0, -1.0, -1.0],
    ];
    const FACES: [[usize; 3]; 4] = [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];
    polyhedron(&VERTICES, &FACES, radius)
}

pub fn octahedron(radius: f32) -> Geometry {
    const VERTICES: [[f32; 3]; 6] = [
        [1.0, 0.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
    ];
    const FACES: [[usize; 3]; 8] = [
        [0, 2, 4],
        [0, 4, 3],
        [0, 3, 5],
        [0, 5, 2],
        [1, 2, 5],
        [1, 5, 3],
        [1, 3, 4],
        [1, 4, 2],
    ];
    polyhedron(&VERTICES, &FACES, radius)
}

pub fn icosahedron(radius: f32) -> Geometry {
    const T: f32 = 1.618_034; // golden ratio
    const VERTICES: [[f32; 3]; 12] = [
        [-1.0, T, 0.0],
        [1.0, T, 0.0],
        [-1.0, -T, 0.0],
        [1.0, -T, 0.0],
        [0.0, -1.0, T],
        [0.0, 1.0, T],
        [0.0, -1.0, -T],
        [0.0, 1.0, -T],
        [T, 0.0, -1.0],
        [T, 0.0, 1.0],
        [-T, 0.0, -1.0],
        [-T, 0.0, 1.0],
    ];
    const FACES: [[usize; 3]; 20] = [
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];
    polyhedron(&VERTICES, &FACES, radius)
}
