//! Test doubles for the host-side traits.
#![allow(dead_code)]

use geomx_core::backend::{Container, FrameScheduler, RenderBackend};
use geomx_core::material::Material;
use geomx_core::resources::{GeometryId, MaterialId, ResourcePool};
use geomx_core::scene::Scene;
use geomx_core::{Camera, Geometry, Result, ViewerError};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Counters that outlive the backend they describe
#[derive(Debug, Default)]
pub struct BackendStats {
    pub geometries_created: usize,
    pub geometries_disposed: usize,
    pub materials_created: usize,
    pub materials_disposed: usize,
    pub material_updates: usize,
    pub renders: usize,
    pub disposed: usize,
    pub size: (u32, u32),
    pub pixel_ratio: f64,
    /// Wireframe flag of the backend's material copy at the last render
    pub last_wireframe: Option<bool>,
}

impl BackendStats {
    pub fn live_geometries(&self) -> usize {
        self.geometries_created - self.geometries_disposed
    }

    pub fn live_materials(&self) -> usize {
        self.materials_created - self.materials_disposed
    }
}

pub struct MockBackend {
    surface: u32,
    pool: ResourcePool,
    stats: Rc<RefCell<BackendStats>>,
}

impl MockBackend {
    pub fn new(surface: u32, stats: Rc<RefCell<BackendStats>>) -> Self {
        Self {
            surface,
            pool: ResourcePool::new(),
            stats,
        }
    }

    pub fn pool(&self) -> &ResourcePool {
        &self.pool
    }
}

impl RenderBackend for MockBackend {
    type Surface = u32;

    fn surface(&self) -> &u32 {
        &self.surface
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.stats.borrow_mut().size = (width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.stats.borrow().size
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.stats.borrow_mut().pixel_ratio = ratio;
    }

    fn create_geometry(&mut self, geometry: Geometry) -> GeometryId {
        self.stats.borrow_mut().geometries_created += 1;
        self.pool.insert_geometry(geometry)
    }

    fn dispose_geometry(&mut self, id: GeometryId) {
        assert!(self.pool.remove_geometry(id), "geometry released twice");
        self.stats.borrow_mut().geometries_disposed += 1;
    }

    fn create_material(&mut self, material: &Material) -> MaterialId {
        self.stats.borrow_mut().materials_created += 1;
        self.pool.insert_material(material)
    }

    fn update_material(&mut self, id: MaterialId, material: &Material) {
        self.pool.update_material(id, material);
        self.stats.borrow_mut().material_updates += 1;
    }

    fn dispose_material(&mut self, id: MaterialId) {
        assert!(self.pool.remove_material(id), "material released twice");
        self.stats.borrow_mut().materials_disposed += 1;
    }

    fn render(&mut self, scene: &Scene, _camera: &Camera) {
        let mut stats = self.stats.borrow_mut();
        assert_eq!(stats.disposed, 0, "render after dispose");
        stats.renders += 1;
        stats.last_wireframe = scene
            .mesh()
            .and_then(|mesh| self.pool.material(mesh.material))
            .map(|material| material.wireframe);
    }

    fn dispose(&mut self) {
        assert_eq!(self.pool.clear(), 0, "resources leaked into dispose");
        self.stats.borrow_mut().disposed += 1;
    }
}

#[derive(Clone, Default)]
pub struct MockContainer {
    pub size: Rc<Cell<(f64, f64)>>,
    pub attached: Rc<RefCell<Vec<u32>>>,
}

impl MockContainer {
    pub fn sized(width: f64, height: f64) -> Self {
        let container = Self::default();
        container.size.set((width, height));
        container
    }
}

impl Container for MockContainer {
    type Surface = u32;

    fn size(&self) -> (f64, f64) {
        self.size.get()
    }

    fn pixel_ratio(&self) -> f64 {
        2.0
    }

    fn attach(&self, surface: &u32) -> Result<()> {
        self.attached.borrow_mut().push(*surface);
        Ok(())
    }

    fn detach(&self, surface: &u32) -> Result<()> {
        let mut attached = self.attached.borrow_mut();
        let index = attached
            .iter()
            .position(|s| s == surface)
            .ok_or_else(|| ViewerError::SurfaceUnavailable("not attached".into()))?;
        attached.remove(index);
        Ok(())
    }

    fn contains(&self, surface: &u32) -> bool {
        self.attached.borrow().contains(surface)
    }
}

#[derive(Debug, Default)]
pub struct SchedulerState {
    next: u32,
    pub queued: Vec<u32>,
    pub cancelled: Vec<u32>,
}

/// Frames fire only when the test pumps them
#[derive(Clone, Default)]
pub struct ManualScheduler {
    pub state: Rc<RefCell<SchedulerState>>,
}

impl ManualScheduler {
    /// Remove and return everything currently queued
    pub fn drain(&self) -> Vec<u32> {
        std::mem::take(&mut self.state.borrow_mut().queued)
    }
}

impl FrameScheduler for ManualScheduler {
    type Token = u32;

    fn request_frame(&mut self) -> Result<u32> {
        let mut state = self.state.borrow_mut();
        state.next += 1;
        let token = state.next;
        state.queued.push(token);
        Ok(token)
    }

    fn cancel_frame(&mut self, token: u32) {
        let mut state = self.state.borrow_mut();
        state.queued.retain(|t| *t != token);
        state.cancelled.push(token);
    }
}

pub fn backend_factory(
    stats: &Rc<RefCell<BackendStats>>,
) -> impl FnOnce(geomx_core::Viewport) -> Result<MockBackend> {
    let stats = Rc::clone(stats);
    move |_| Ok(MockBackend::new(7, stats))
}
