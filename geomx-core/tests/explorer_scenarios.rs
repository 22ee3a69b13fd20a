mod common;

use common::{backend_factory, BackendStats, ManualScheduler, MockBackend, MockContainer};
use geomx_core::storage::{AUTO_ROTATE_KEY, WIREFRAME_KEY};
use geomx_core::{Catalog, Explorer, KeyValueStore, MemoryStore, ViewAction, ViewerConfig};
use std::cell::RefCell;
use std::rc::Rc;

type TestExplorer = Explorer<MockBackend, MockContainer, ManualScheduler>;

struct Harness {
    explorer: TestExplorer,
    stats: Rc<RefCell<BackendStats>>,
    scheduler: ManualScheduler,
}

impl Harness {
    fn mount_with(store: MemoryStore) -> Self {
        let scheduler = ManualScheduler::default();
        let stats = Rc::default();
        let mut explorer = TestExplorer::new(ViewerConfig::default(), Box::new(store), scheduler.clone());
        explorer
            .mount(MockContainer::sized(800.0, 600.0), backend_factory(&stats))
            .unwrap();
        Self {
            explorer,
            stats,
            scheduler,
        }
    }

    /// Fire every queued frame callback once, as the host would
    fn pump(&mut self) -> usize {
        let queued = self.scheduler.drain();
        queued.iter().filter(|_| self.explorer.frame()).count()
    }

    fn renders(&self) -> usize {
        self.stats.borrow().renders
    }
}

#[test]
fn default_shape_then_select_sphere() {
    let mut h = Harness::mount_with(MemoryStore::new());
    let cube = Catalog::first();
    assert_eq!(h.explorer.scene().mesh().unwrap().shape_id, cube.id);
    let wireframe_before = h.explorer.view().wireframe;

    h.explorer.dispatch(ViewAction::SelectShape("sphere".into()));

    let mesh = h.explorer.scene().mesh().unwrap();
    assert_eq!(mesh.shape_id, "sphere");
    assert_eq!(mesh.material_data.color, Catalog::get("sphere").unwrap().color());
    assert_eq!(mesh.material_data.wireframe, wireframe_before);
    assert_eq!(h.explorer.view().wireframe, wireframe_before);
    assert_eq!(h.stats.borrow().live_geometries(), 1);
}

#[test]
fn fresh_session_auto_rotates_and_persists_toggle() {
    let mut h = Harness::mount_with(MemoryStore::new());
    assert!(h.explorer.view().auto_rotate);

    h.pump();
    let spun = h.explorer.scene().mesh().unwrap().rotation;
    assert!((spun.x - 0.01).abs() < 1e-6);
    assert!((spun.y - 0.015).abs() < 1e-6);

    h.explorer.dispatch(ViewAction::ToggleAutoRotate);
    assert_eq!(
        h.explorer.bridge().store().get(AUTO_ROTATE_KEY).as_deref(),
        Some("false")
    );

    h.pump();
    h.pump();
    assert_eq!(h.explorer.scene().mesh().unwrap().rotation, spun);
    assert_eq!(h.renders(), 3);
}

#[test]
fn wireframe_survives_shape_changes_and_restores_from_storage() {
    let store = MemoryStore::with_entries([(WIREFRAME_KEY, "true"), (AUTO_ROTATE_KEY, "false")]);
    let mut h = Harness::mount_with(store);
    assert!(h.explorer.view().wireframe);
    assert!(!h.explorer.view().auto_rotate);
    assert!(h.explorer.scene().mesh().unwrap().material_data.wireframe);

    h.explorer.dispatch(ViewAction::SelectShape("octahedron".into()));
    assert!(h.explorer.scene().mesh().unwrap().material_data.wireframe);

    h.explorer.dispatch(ViewAction::ToggleWireframe);
    h.pump();
    assert_eq!(h.stats.borrow().last_wireframe, Some(false));
    assert_eq!(
        h.explorer.bridge().store().get(WIREFRAME_KEY).as_deref(),
        Some("false")
    );
}

#[test]
fn loop_reschedules_exactly_once_per_frame() {
    let mut h = Harness::mount_with(MemoryStore::new());
    for _ in 0..10 {
        assert_eq!(h.pump(), 1);
    }
    assert_eq!(h.renders(), 10);
    assert_eq!(h.explorer.render_loop().frames(), 10);
    assert_eq!(h.scheduler.state.borrow().queued.len(), 1);
}

#[test]
fn no_frame_runs_after_unmount() {
    let mut h = Harness::mount_with(MemoryStore::new());
    h.pump();
    let renders = h.renders();

    // a callback the host had already queued when unmount began
    let in_flight = h.scheduler.state.borrow().queued.clone();
    assert_eq!(in_flight.len(), 1);

    h.explorer.unmount();
    assert!(h.scheduler.state.borrow().queued.is_empty());
    assert_eq!(h.scheduler.state.borrow().cancelled, in_flight);

    for _ in in_flight {
        assert!(!h.explorer.frame());
    }
    for _ in 0..5 {
        assert_eq!(h.pump(), 0);
    }
    assert_eq!(h.renders(), renders);
    assert_eq!(h.stats.borrow().disposed, 1);
    assert_eq!(h.stats.borrow().live_geometries(), 0);
}

#[test]
fn resize_after_unmount_is_ignored() {
    let mut h = Harness::mount_with(MemoryStore::new());
    h.explorer.unmount();
    h.explorer.handle_resize();
    assert_eq!(h.stats.borrow().size, (800, 600));
}

#[test]
fn unknown_selection_keeps_current_mesh() {
    let mut h = Harness::mount_with(MemoryStore::new());
    let geometry = h.explorer.scene().mesh().unwrap().geometry;
    h.explorer.dispatch(ViewAction::SelectShape("hexagon".into()));
    assert_eq!(h.explorer.scene().mesh().unwrap().geometry, geometry);
    assert_eq!(h.explorer.view().selected_shape, "cube");
}
