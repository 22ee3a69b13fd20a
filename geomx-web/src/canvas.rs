//! Canvas 2D backend: paints the shared draw list onto an HTML canvas.

use crate::dom::js_error;
use geomx_core::material::Material;
use geomx_core::raster::{self, ScreenFace, ScreenLine};
use geomx_core::resources::{GeometryId, MaterialId, ResourcePool};
use geomx_core::scene::Scene;
use geomx_core::{Camera, Geometry, RenderBackend, Result};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    /// Logical (CSS pixel) size
    size: (u32, u32),
    pixel_ratio: f64,
    pool: ResourcePool,
    disposed: bool,
}

impl CanvasRenderer {
    pub fn new(document: &Document) -> Result<Self> {
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|err| js_error("create canvas", err))?
            .dyn_into()
            .map_err(|_| js_error("create canvas", "element is not a canvas".into()))?;
        let context = canvas
            .get_context("2d")
            .map_err(|err| js_error("get 2d context", err))?
            .ok_or_else(|| js_error("get 2d context", "2d canvas not supported".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| js_error("get 2d context", "unexpected context type".into()))?;
        canvas.set_attribute("style", "display: block").ok();

        Ok(Self {
            canvas,
            context,
            size: (0, 0),
            pixel_ratio: 1.0,
            pool: ResourcePool::new(),
            disposed: false,
        })
    }

    /// Backing-store size in device pixels
    fn buffer_size(&self) -> (u32, u32) {
        let scale = |v: u32| (v as f64 * self.pixel_ratio).round() as u32;
        (scale(self.size.0), scale(self.size.1))
    }

    fn apply_size(&self) {
        let (width, height) = self.buffer_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let style = self.canvas.style();
        for (property, value) in [("width", self.size.0), ("height", self.size.1)] {
            if let Err(err) = style.set_property(property, &format!("{}px", value)) {
                log::debug!("could not set canvas {}: {:?}", property, err);
            }
        }
    }

    fn stroke_line(&self, line: &ScreenLine) {
        let ctx = &self.context;
        ctx.set_stroke_style_str(&line.color.to_css());
        ctx.begin_path();
        ctx.move_to(line.from.x as f64, line.from.y as f64);
        ctx.line_to(line.to.x as f64, line.to.y as f64);
        ctx.stroke();
    }

    fn fill_face(&self, face: &ScreenFace) {
        let ctx = &self.context;
        let css = face.color.to_css();
        let [a, b, c] = face.points;
        ctx.set_fill_style_str(&css);
        // stroking with the fill colour hides hairline seams between faces
        ctx.set_stroke_style_str(&css);
        ctx.begin_path();
        ctx.move_to(a.x as f64, a.y as f64);
        ctx.line_to(b.x as f64, b.y as f64);
        ctx.line_to(c.x as f64, c.y as f64);
        ctx.close_path();
        ctx.fill();
        ctx.stroke();
    }
}

impl RenderBackend for CanvasRenderer {
    type Surface = HtmlCanvasElement;

    fn surface(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.apply_size();
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 };
        self.apply_size();
    }

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
        let (width, height) = self.buffer_size();
        let list = raster::build_draw_list(scene, camera, &self.pool, width, height);

        let ctx = &self.context;
        ctx.set_fill_style_str(&list.background.to_css());
        ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
        ctx.set_line_width(self.pixel_ratio);

        for line in &list.helpers {
            self.stroke_line(line);
        }
        for face in &list.faces {
            self.fill_face(face);
        }
        for edge in &list.edges {
            self.stroke_line(edge);
        }
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        let leaked = self.pool.clear();
        if leaked > 0 {
            log::warn!("{} resources still alive at dispose", leaked);
        }
        // shrinking the backing store frees its pixel memory
        self.canvas.set_width(0);
        self.canvas.set_height(0);
        self.disposed = true;
        log::debug!("canvas renderer disposed");
    }
}
