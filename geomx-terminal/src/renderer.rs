//! ASCII rasterizer for terminal rendering

use crossterm::{
    cursor::MoveTo,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use geomx_core::material::Material;
use geomx_core::raster::{self, ScreenFace, ScreenLine, ScreenPoint};
use geomx_core::resources::{GeometryId, MaterialId, ResourcePool};
use geomx_core::scene::Scene;
use geomx_core::{Camera, Color, Geometry, RenderBackend};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// ASCII renderer that converts the scene to coloured terminal characters.
///
/// Output size is given in "pixels" where one cell is one pixel wide and two
/// pixels tall, so the camera aspect matches the on-screen shape.
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
    pool: ResourcePool,
    surface: (),
    disposed: bool,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            depth_buffer: Vec::new(),
            char_buffer: Vec::new(),
            color_buffer: Vec::new(),
            pool: ResourcePool::new(),
            surface: (),
            disposed: false,
        }
    }

    /// Size of the character grid as (columns, rows)
    pub fn cells(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }

    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    pub fn clear(&mut self, background: Color) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(background);
    }

    fn plot(&mut self, x: i32, y: i32, depth: f32, character: char, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
            self.color_buffer[idx] = color;
        }
    }

    fn rasterize_face(&mut self, face: &ScreenFace) {
        let [v0, v1, v2] = face.points;

        // Map brightness to character
        let char_index = (face.brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let character = LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)];

        // Bounding box, clipped to screen bounds
        let min_x = v0.x.min(v1.x).min(v2.x).floor().max(0.0) as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).ceil().min(self.width as f32 - 1.0) as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).floor().max(0.0) as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).ceil().min(self.height as f32 - 1.0) as i32;

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.depth + w1 * v1.depth + w2 * v2.depth;
                        self.plot(x, y, depth, character, face.color);
                    }
                }
            }
        }
    }

    /// DDA line with a glyph picked from the on-screen slope
    fn rasterize_line(&mut self, line: &ScreenLine) {
        let (from, to) = (line.from, line.to);
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let character = line_glyph(dx, dy);

        // Segments that start far off screen are trimmed to the visible box first
        let Some((t0, t1)) = clip_to_box(from, dx, dy, self.width as f32, self.height as f32) else {
            return;
        };
        let steps = ((dx.abs().max(dy.abs()) * (t1 - t0)).ceil() as i32).max(1);
        for i in 0..=steps {
            let t = t0 + (t1 - t0) * i as f32 / steps as f32;
            let depth = from.depth + (to.depth - from.depth) * t;
            // nudge lines in front of faces they lie on
            self.plot(
                (from.x + dx * t).floor() as i32,
                (from.y + dy * t).floor() as i32,
                depth - 1e-4,
                character,
                line.color,
            );
        }
    }

    /// Write the character grid with its top-left corner at (`column`, `row`)
    pub fn draw<W: Write>(&self, writer: &mut W, column: u16, row: u16) -> std::io::Result<()> {
        let mut current: Option<Color> = None;
        for y in 0..self.height {
            writer.queue(MoveTo(column, row + y as u16))?;
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = self.color_buffer[idx];
                if current != Some(color) {
                    let (r, g, b) = color.to_rgb8();
                    writer.queue(SetForegroundColor(TermColor::Rgb { r, g, b }))?;
                    current = Some(color);
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for AsciiRenderer {
    type Surface = ();

    fn surface(&self) -> &() {
        &self.surface
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width as usize;
        self.height = (height / 2) as usize;
        let size = self.width * self.height;
        self.depth_buffer = vec![f32::INFINITY; size];
        self.char_buffer = vec![' '; size];
        self.color_buffer = vec![Color::WHITE; size];
    }

    fn size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32 * 2)
    }

    fn set_pixel_ratio(&mut self, _ratio: f64) {}

    fn create_geometry(&mut self, geometry: Geometry) -> GeometryId {
        self.pool.insert_geometry(geometry)
    }

    fn dispose_geometry(&mut self, id: GeometryId) {
        if !self.pool.remove_geometry(id) {
            log::warn!("geometry {:?} released twice", id);
        }
    }

    fn create_material(&mut self, material: &Material) -> MaterialId {
        self.pool.insert_material(material)
    }

    fn update_material(&mut self, id: MaterialId, material: &Material) {
        self.pool.update_material(id, material);
    }

    fn dispose_material(&mut self, id: MaterialId) {
        if !self.pool.remove_material(id) {
            log::warn!("material {:?} released twice", id);
        }
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) {
        if self.disposed {
            return;
        }
        let list = raster::build_draw_list(
            scene,
            camera,
            &self.pool,
            self.width as u32,
            self.height as u32,
        );

        // background stays dark so the helpers read as lines
        self.clear(scene.background);
        for line in &list.helpers {
            self.rasterize_line(line);
        }
        for face in &list.faces {
            self.rasterize_face(face);
        }
        for edge in &list.edges {
            self.rasterize_line(edge);
        }
    }

    fn dispose(&mut self) {
        let leaked = self.pool.clear();
        if leaked > 0 {
            log::warn!("{} resources still alive at dispose", leaked);
        }
        self.depth_buffer.clear();
        self.char_buffer.clear();
        self.color_buffer.clear();
        self.width = 0;
        self.height = 0;
        self.disposed = true;
    }
}

fn line_glyph(dx: f32, dy: f32) -> char {
    // screen y grows downward and cells are twice as tall as wide
    let slope = -dy * 2.0 / dx;
    if dx.abs() < f32::EPSILON || slope.abs() > 2.5 {
        '|'
    } else if slope.abs() < 0.4 {
        '-'
    } else if slope > 0.0 {
        '/'
    } else {
        '\\'
    }
}

/// Parametric range of `from + t * (dx, dy)` inside the box, clamped to 0..1
fn clip_to_box(from: ScreenPoint, dx: f32, dy: f32, width: f32, height: f32) -> Option<(f32, f32)> {
    let (mut t0, mut t1) = (0.0f32, 1.0f32);
    for (p, q) in [
        (-dx, from.x),
        (dx, width - from.x),
        (-dy, from.y),
        (dy, height - from.y),
    ] {
        if p.abs() < f32::EPSILON {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
    }
    (t0 <= t1).then_some((t0, t1))
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: ScreenPoint,
    v1: ScreenPoint,
    v2: ScreenPoint,
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.y - v2.y) * (p.0 - v2.x) + (v2.x - v1.x) * (p.1 - v2.y)) / denom;
    let w1 = ((v2.y - v0.y) * (p.0 - v2.x) + (v0.x - v2.x) * (p.1 - v2.y)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
