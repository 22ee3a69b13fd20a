//! Geomx Core Library - Platform-free scene lifecycle for the geometry explorer
//!
//! This library owns everything the browser and terminal hosts share: the
//! shape catalog and its tessellation, the scene graph, camera and projection,
//! the lifecycle manager, the render loop driver and the persisted view state.

pub mod backend;
pub mod catalog;
pub mod color;
pub mod config;
pub mod error;
pub mod explorer;
pub mod geometry;
pub mod lifecycle;
pub mod material;
pub mod primitives;
pub mod projection;
pub mod raster;
pub mod render_loop;
pub mod resources;
pub mod scene;
pub mod state;
pub mod storage;
pub mod transform;

// Re-export commonly used types
pub use backend::{Container, FrameScheduler, RenderBackend};
pub use catalog::{Catalog, ShapeDefinition};
pub use color::Color;
pub use config::ViewerConfig;
pub use error::{Result, StorageError, ViewerError};
pub use explorer::Explorer;
pub use geometry::{Geometry, Triangle, Vertex};
pub use lifecycle::SceneManager;
pub use projection::{Camera, Viewport};
pub use render_loop::RenderLoop;
pub use resources::{GeometryId, MaterialId, ResourcePool};
pub use state::{SceneCommand, SharedViewState, StateBridge, ViewAction, ViewState};
pub use storage::{KeyValueStore, MemoryStore};
pub use transform::RotationState;
