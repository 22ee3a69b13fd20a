use crate::color::Color;

/// Surface appearance of the active mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    pub wireframe: bool,
    /// Set when a field changed and the backend copy is stale
    pub needs_update: bool,
}

impl Material {
    pub fn new(color: Color, wireframe: bool) -> Self {
        Self {
            color,
            wireframe,
            needs_update: false,
        }
    }

    /// Change the wireframe flag in place and mark the material dirty
    pub fn set_wireframe(&mut self, wireframe: bool) {
        if self.wireframe != wireframe {
            self.wireframe = wireframe;
            self.needs_update = true;
        }
    }
}
