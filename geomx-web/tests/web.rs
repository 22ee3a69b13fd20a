//! Browser tests; run with `wasm-pack test --headless --firefox geomx-web`
#![cfg(target_arch = "wasm32")]

use geomx_core::KeyValueStore;
use geomx_web::{GeometryExplorer, LocalStore};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn host(id: &str) -> web_sys::HtmlElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let host = document
        .create_element("div")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();
    host.set_id(id);
    host.set_attribute("style", "width: 640px; height: 480px").unwrap();
    document.body().unwrap().append_child(&host).unwrap();
    host
}

fn clear_storage() {
    let storage = web_sys::window().unwrap().local_storage().unwrap().unwrap();
    storage.clear().unwrap();
}

#[wasm_bindgen_test]
fn test_local_store_round_trip() {
    clear_storage();
    let mut store = LocalStore::new();
    assert!(store.is_available());
    assert_eq!(store.get("wireframe"), None);
    store.set("wireframe", "true").unwrap();
    assert_eq!(LocalStore::new().get("wireframe").as_deref(), Some("true"));
}

#[wasm_bindgen_test]
fn test_mount_adds_canvas_and_unmount_removes_it() {
    clear_storage();
    let host = host("geomx-mount");
    let mut viewer = GeometryExplorer::new().unwrap();
    viewer.mount("geomx-mount").unwrap();

    assert_eq!(host.query_selector_all("canvas").unwrap().length(), 1);
    assert_eq!(host.query_selector_all("button[data-shape]").unwrap().length(), 8);

    viewer.unmount();
    viewer.unmount();
    assert_eq!(host.child_element_count(), 0);
    host.remove();
}

#[wasm_bindgen_test]
fn test_toggles_persist_to_local_storage() {
    clear_storage();
    let host = host("geomx-toggles");
    let mut viewer = GeometryExplorer::new().unwrap();
    viewer.mount("geomx-toggles").unwrap();

    viewer.toggle_auto_rotate();
    viewer.toggle_wireframe();
    viewer.select_shape("torus");
    viewer.select_shape("no-such-shape");
    assert_eq!(viewer.selected_shape(), "torus");

    let store = LocalStore::new();
    assert_eq!(store.get("autoRotate").as_deref(), Some("false"));
    assert_eq!(store.get("wireframe").as_deref(), Some("true"));

    viewer.unmount();
    let restored = GeometryExplorer::new().unwrap();
    assert!(!restored.auto_rotate());
    assert!(restored.wireframe());
    assert_eq!(restored.selected_shape(), "cube");
    host.remove();
}

#[wasm_bindgen_test]
fn test_mount_into_missing_element_fails() {
    let mut viewer = GeometryExplorer::new().unwrap();
    assert!(viewer.mount("geomx-does-not-exist").is_err());
}
