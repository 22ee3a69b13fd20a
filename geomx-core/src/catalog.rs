//! The fixed set of shapes the explorer can display.

use crate::color::Color;
use crate::geometry::Geometry;
use crate::primitives;

pub struct ShapeDefinition {
    pub id: &'static str,
    pub display_name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    /// Display colour as `0xRRGGBB`
    pub color_hex: u32,
    pub build: fn() -> Geometry,
}

impl std::fmt::Debug for ShapeDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeDefinition")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("color", &format_args!("{:06x}", self.color_hex))
            .finish()
    }
}

static SHAPES: [ShapeDefinition; 8] = [
    ShapeDefinition {
        id: "cube",
        display_name: "Cube",
        category: "Prism",
        description: "Six square faces meeting at right angles",
        color_hex: 0x4f9dff,
        build: || primitives::cuboid(1.5, 1.5, 1.5),
    },
    ShapeDefinition {
        id: "sphere",
        display_name: "Sphere",
        category: "Curved",
        description: "Every surface point equidistant from the centre",
        color_hex: 0xff6b6b,
        build: || primitives::sphere(1.0, 32, 16),
    },
    ShapeDefinition {
        id: "cone",
        display_name: "Cone",
        category: "Curved",
        description: "A circular base tapering to a single apex",
        color_hex: 0xffd93d,
        build: || primitives::cone(1.0, 2.0, 32),
    },
    ShapeDefinition {
        id: "cylinder",
        display_name: "Cylinder",
        category: "Curved",
        description: "Two parallel circular faces joined by a curved wall",
        color_hex: 0x6bcb77,
        build: || primitives::cylinder(1.0, 1.0, 2.0, 32),
    },
    ShapeDefinition {
        id: "torus",
        display_name: "Torus",
        category: "Curved",
        description: "A circle swept around an axis in its own plane",
        color_hex: 0xc77dff,
        build: || primitives::torus(1.0, 0.4, 16, 48),
    },
    ShapeDefinition {
        id: "tetrahedron",
        display_name: "Tetrahedron",
        category: "Platonic",
        description: "Four equilateral triangle faces",
        color_hex: 0xff9f43,
        build: || primitives::tetrahedron(1.2),
    },
    ShapeDefinition {
        id: "octahedron",
        display_name: "Octahedron",
        category: "Platonic",
        description: "Eight equilateral triangle faces",
        color_hex: 0x00d2d3,
        build: || primitives::octahedron(1.2),
    },
    ShapeDefinition {
        id: "icosahedron",
        display_name: "Icosahedron",
        category: "Platonic",
        description: "Twenty equilateral triangle faces",
        color_hex: 0xf368e0,
        build: || primitives::icosahedron(1.2),
    },
];

impl ShapeDefinition {
    pub fn color(&self) -> Color {
        Color::from_hex(self.color_hex)
    }
}

/// Lookup and ordered iteration over the static shape table
pub struct Catalog;

impl Catalog {
    pub fn get(id: &str) -> Option<&'static ShapeDefinition> {
        SHAPES.iter().find(|shape| shape.id == id)
    }

    /// Shapes in display order
    pub fn iter() -> std::slice::Iter<'static, ShapeDefinition> {
        SHAPES.iter()
    }

    pub fn first() -> &'static ShapeDefinition {
        &SHAPES[0]
    }

    pub fn position(id: &str) -> Option<usize> {
        SHAPES.iter().position(|shape| shape.id == id)
    }

    pub fn len() -> usize {
        SHAPES.len()
    }
}
