mod common;

use common::{backend_factory, BackendStats, MockBackend, MockContainer};
use geomx_core::{Catalog, SceneManager, ViewState, ViewerConfig, ViewerError};
use std::cell::RefCell;
use std::rc::Rc;

type Manager = SceneManager<MockBackend, MockContainer>;

fn mounted(container: &MockContainer, stats: &Rc<RefCell<BackendStats>>) -> Manager {
    let mut manager = Manager::new(ViewerConfig::default());
    manager
        .mount(container.clone(), ViewState::default(), backend_factory(stats))
        .unwrap();
    manager
}

#[test]
fn mount_builds_context_and_attaches_surface() {
    let stats = Rc::default();
    let container = MockContainer::sized(1024.0, 768.0);
    let manager = mounted(&container, &stats);

    let scene = manager.scene().unwrap();
    assert_eq!(scene.lights().len(), 2);
    assert_eq!(scene.helpers().len(), 2);
    assert_eq!(scene.object_count(), 5);
    assert_eq!(manager.mesh().unwrap().shape_id, "cube");

    assert_eq!(*container.attached.borrow(), vec![7]);
    let stats = stats.borrow();
    assert_eq!(stats.size, (1024, 768));
    assert_eq!(stats.pixel_ratio, 2.0);
    assert_eq!((stats.live_geometries(), stats.live_materials()), (1, 1));
}

#[test]
fn zero_sized_container_falls_back_to_default() {
    let stats = Rc::default();
    let container = MockContainer::sized(0.0, 0.0);
    let manager = mounted(&container, &stats);

    assert_eq!(stats.borrow().size, (800, 600));
    let aspect = manager.camera().unwrap().aspect;
    assert!((aspect - 800.0 / 600.0).abs() < 1e-6);
}

#[test]
fn every_shape_switch_keeps_exactly_one_mesh() {
    let stats = Rc::default();
    let container = MockContainer::sized(800.0, 600.0);
    let mut manager = mounted(&container, &stats);

    for _ in 0..3 {
        for shape in Catalog::iter() {
            assert!(manager.set_shape(shape.id, false));
            let mesh = manager.mesh().unwrap();
            assert_eq!(mesh.shape_id, shape.id);
            assert_eq!(mesh.material_data.color, shape.color());
            assert_eq!(manager.scene().unwrap().object_count(), 5);

            let stats = stats.borrow();
            assert_eq!((stats.live_geometries(), stats.live_materials()), (1, 1));
        }
    }
    assert_eq!(stats.borrow().geometries_created, 1 + 3 * Catalog::len());
}

#[test]
fn unknown_shape_is_ignored() {
    let stats = Rc::default();
    let container = MockContainer::sized(800.0, 600.0);
    let mut manager = mounted(&container, &stats);
    let before = manager.mesh().unwrap().geometry;

    assert!(!manager.set_shape("mobius", true));
    assert_eq!(manager.mesh().unwrap().geometry, before);
    assert_eq!(stats.borrow().geometries_created, 1);
}

#[test]
fn wireframe_toggle_mutates_material_in_place() {
    let stats = Rc::default();
    let container = MockContainer::sized(800.0, 600.0);
    let mut manager = mounted(&container, &stats);
    let (geometry, material) = {
        let mesh = manager.mesh().unwrap();
        (mesh.geometry, mesh.material)
    };

    manager.set_wireframe(true);
    assert!(manager.mesh().unwrap().material_data.needs_update);
    manager.render();
    assert_eq!(stats.borrow().last_wireframe, Some(true));
    assert!(!manager.mesh().unwrap().material_data.needs_update);

    manager.set_wireframe(false);
    manager.render();
    assert_eq!(stats.borrow().last_wireframe, Some(false));

    let mesh = manager.mesh().unwrap();
    assert_eq!((mesh.geometry, mesh.material), (geometry, material));
    let stats = stats.borrow();
    assert_eq!(stats.geometries_created, 1);
    assert_eq!(stats.materials_created, 1);
    assert_eq!(stats.material_updates, 2);
}

#[test]
fn resize_tracks_container_exactly() {
    let stats = Rc::default();
    let container = MockContainer::sized(400.0, 300.0);
    let mut manager = mounted(&container, &stats);

    for (width, height) in [(400.0, 300.0), (1200.0, 900.0), (1200.0, 900.0)] {
        container.size.set((width, height));
        manager.fit_to_container();

        let camera = manager.camera().unwrap();
        assert!((camera.aspect - (width / height) as f32).abs() < 1e-6);
        let expected = nalgebra::Matrix4::new_perspective(camera.aspect, camera.fov, camera.near, camera.far);
        assert!((camera.projection_matrix() - expected).norm() < 1e-6);
        assert_eq!(stats.borrow().size, (width as u32, height as u32));
    }
}

#[test]
fn camera_survives_shape_changes() {
    let stats = Rc::default();
    let container = MockContainer::sized(800.0, 600.0);
    let mut manager = mounted(&container, &stats);
    let position = manager.camera().unwrap().position;

    manager.set_shape("torus", false);
    assert_eq!(manager.camera().unwrap().position, position);
    assert_eq!(manager.scene().unwrap().lights().len(), 2);
}

#[test]
fn unmount_releases_everything_once() {
    let stats = Rc::default();
    let container = MockContainer::sized(800.0, 600.0);
    let mut manager = mounted(&container, &stats);
    manager.set_shape("sphere", false);

    manager.unmount();
    manager.unmount();

    assert!(!manager.is_mounted());
    assert!(container.attached.borrow().is_empty());
    let stats = stats.borrow();
    assert_eq!((stats.live_geometries(), stats.live_materials()), (0, 0));
    assert_eq!(stats.disposed, 1);
}

#[test]
fn unmount_skips_detach_when_surface_already_removed() {
    let stats = Rc::default();
    let container = MockContainer::sized(800.0, 600.0);
    let mut manager = mounted(&container, &stats);

    container.attached.borrow_mut().clear();
    manager.unmount();
    assert_eq!(stats.borrow().disposed, 1);
}

#[test]
fn unmount_without_mount_is_noop() {
    let mut manager = Manager::new(ViewerConfig::default());
    manager.unmount();
    manager.render();
    manager.resize(100.0, 100.0);
    assert!(!manager.set_shape("cube", false));
}

#[test]
fn failed_renderer_construction_still_unmounts_cleanly() {
    let container = MockContainer::sized(800.0, 600.0);
    let mut manager = Manager::new(ViewerConfig::default());

    let result = manager.mount(container.clone(), ViewState::default(), |_| {
        Err(ViewerError::Backend("no context".into()))
    });
    assert!(matches!(result, Err(ViewerError::Backend(_))));
    assert!(manager.is_mounted());
    assert!(manager.mesh().is_none());
    assert!(container.attached.borrow().is_empty());

    manager.unmount();
    assert!(!manager.is_mounted());
}

#[test]
fn remount_tears_down_previous_context() {
    let first = Rc::default();
    let container = MockContainer::sized(800.0, 600.0);
    let mut manager = mounted(&container, &first);

    let second = Rc::default();
    manager
        .mount(container.clone(), ViewState::default(), backend_factory(&second))
        .unwrap();

    assert_eq!(first.borrow().disposed, 1);
    assert_eq!(first.borrow().live_geometries(), 0);
    assert_eq!(second.borrow().live_geometries(), 1);
    assert_eq!(container.attached.borrow().len(), 1);
}
