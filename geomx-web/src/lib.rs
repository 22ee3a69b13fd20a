//! Geomx Web - browser host for the geometry explorer
//!
//! Mounts a Canvas 2D view, a shape sidebar and the wireframe / auto-rotate
//! toggles into a host element. Toggle values persist in `localStorage`.

use geomx_core::{Catalog, Explorer, ViewAction, ViewerConfig, ViewerError};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub mod canvas;
pub mod dom;
pub mod frame;
pub mod storage;
pub mod ui;

pub use canvas::CanvasRenderer;
pub use dom::{ElementContainer, EventListener};
pub use frame::{FrameCallback, RafScheduler};
pub use storage::LocalStore;
pub use ui::Ui;

pub type WebExplorer = Explorer<CanvasRenderer, ElementContainer, RafScheduler>;

fn to_js(err: ViewerError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// DOM pieces that only exist while mounted
struct Mounted {
    host: web_sys::HtmlElement,
    ui: Rc<Ui>,
    listeners: Vec<EventListener>,
}

impl Mounted {
    /// Drop the listeners and take the UI out of the host
    fn remove(self) {
        drop(self.listeners);
        let root: &web_sys::Node = &self.ui.root;
        if self.host.contains(Some(root)) {
            let _ = self.host.remove_child(root);
        }
    }
}

/// Dispatch `action` through a weak handle and refresh the controls
fn dispatch_to(explorer: &Weak<RefCell<WebExplorer>>, ui: &Ui, action: ViewAction) {
    let Some(explorer) = explorer.upgrade() else {
        return;
    };
    let Ok(mut explorer) = explorer.try_borrow_mut() else {
        log::debug!("explorer busy; dropping {:?}", action);
        return;
    };
    explorer.dispatch(action);
    ui.refresh(&explorer.view());
}

#[wasm_bindgen]
pub struct GeometryExplorer {
    explorer: Rc<RefCell<WebExplorer>>,
    frame_callback: FrameCallback,
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl GeometryExplorer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<GeometryExplorer, JsValue> {
        let window = dom::window().map_err(to_js)?;
        let scheduler = RafScheduler::new(window);
        let frame_callback = scheduler.callback();
        let explorer = Rc::new(RefCell::new(Explorer::new(
            ViewerConfig::default(),
            Box::new(LocalStore::new()),
            scheduler,
        )));

        // The callback holds a weak handle so it never keeps the explorer alive
        let weak = Rc::downgrade(&explorer);
        *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(explorer) = weak.upgrade() {
                if let Ok(mut explorer) = explorer.try_borrow_mut() {
                    explorer.frame();
                }
            }
        }) as Box<dyn FnMut()>));

        Ok(GeometryExplorer {
            explorer,
            frame_callback,
            mounted: None,
        })
    }

    /// Build the viewer inside the element with id `element_id`
    pub fn mount(&mut self, element_id: &str) -> Result<(), JsValue> {
        self.unmount();
        if self.mounted.is_some() {
            return Err(JsValue::from_str("viewer is busy; mount again later"));
        }

        let window = dom::window().map_err(to_js)?;
        let document = dom::document().map_err(to_js)?;
        let host = document
            .get_element_by_id(element_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", element_id)))?
            .dyn_into::<web_sys::HtmlElement>()
            .map_err(|_| JsValue::from_str("mount target is not an HTML element"))?;

        let ui = Rc::new(Ui::build(&document).map_err(to_js)?);
        host.append_child(&ui.root)?;

        let container = ElementContainer::new(ui.stage.clone());
        let mounted = self
            .explorer
            .borrow_mut()
            .mount(container, |_| CanvasRenderer::new(&document));
        let listeners = mounted.and_then(|()| {
            ui.refresh(&self.explorer.borrow().view());
            self.listen(&window, &ui)
        });
        self.finish_mount(host, ui, listeners)?;
        log::info!("geometry explorer mounted in #{}", element_id);
        Ok(())
    }

    /// Tear down the viewer; safe to call repeatedly
    pub fn unmount(&mut self) {
        let Some(mounted) = self.mounted.take() else {
            return;
        };
        let Ok(mut explorer) = self.explorer.try_borrow_mut() else {
            // keep everything in place so the next call can finish the job
            log::warn!("unmount while explorer is busy; deferring");
            self.mounted = Some(mounted);
            return;
        };
        explorer.unmount();
        drop(explorer);
        mounted.remove();
        log::info!("geometry explorer unmounted");
    }

    pub fn select_shape(&mut self, id: &str) {
        self.dispatch(ViewAction::SelectShape(id.to_string()));
    }

    pub fn toggle_wireframe(&mut self) {
        self.dispatch(ViewAction::ToggleWireframe);
    }

    pub fn toggle_auto_rotate(&mut self) {
        self.dispatch(ViewAction::ToggleAutoRotate);
    }

    #[wasm_bindgen(getter)]
    pub fn selected_shape(&self) -> String {
        self.explorer.borrow().view().selected_shape.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn wireframe(&self) -> bool {
        self.explorer.borrow().view().wireframe
    }

    #[wasm_bindgen(getter)]
    pub fn auto_rotate(&self) -> bool {
        self.explorer.borrow().view().auto_rotate
    }

    /// Catalog ids in display order
    pub fn shape_ids() -> js_sys::Array {
        Catalog::iter().map(|shape| JsValue::from_str(shape.id)).collect()
    }
}

impl GeometryExplorer {
    /// Wire the sidebar, toggles and window resize to the explorer
    fn listen(&self, window: &web_sys::Window, ui: &Rc<Ui>) -> geomx_core::Result<Vec<EventListener>> {
        let mut listeners = Vec::new();
        let weak = Rc::downgrade(&self.explorer);
        for (id, button) in &ui.shape_buttons {
            let (weak, ui_handle, id) = (weak.clone(), Rc::clone(ui), id.to_string());
            listeners.push(EventListener::new(button, "click", move |_| {
                dispatch_to(&weak, &ui_handle, ViewAction::SelectShape(id.clone()))
            })?);
        }

        let toggles = [
            (&ui.rotate_button, ViewAction::ToggleAutoRotate),
            (&ui.wireframe_button, ViewAction::ToggleWireframe),
        ];
        for (button, action) in toggles {
            let (weak, ui_handle) = (weak.clone(), Rc::clone(ui));
            listeners.push(EventListener::new(button, "click", move |_| {
                dispatch_to(&weak, &ui_handle, action.clone())
            })?);
        }

        listeners.push(EventListener::new(window, "resize", move |_| {
            if let Some(explorer) = weak.upgrade() {
                if let Ok(mut explorer) = explorer.try_borrow_mut() {
                    explorer.handle_resize();
                }
            }
        })?);
        Ok(listeners)
    }

    /// Keep the mount on success; otherwise release the scene and the DOM
    /// built so far
    fn finish_mount(
        &mut self,
        host: web_sys::HtmlElement,
        ui: Rc<Ui>,
        listeners: geomx_core::Result<Vec<EventListener>>,
    ) -> Result<(), JsValue> {
        match listeners {
            Ok(listeners) => {
                self.mounted = Some(Mounted { host, ui, listeners });
                Ok(())
            }
            Err(err) => {
                self.explorer.borrow_mut().unmount();
                Mounted {
                    host,
                    ui,
                    listeners: Vec::new(),
                }
                .remove();
                Err(to_js(err))
            }
        }
    }

    fn dispatch(&mut self, action: ViewAction) {
        let Ok(mut explorer) = self.explorer.try_borrow_mut() else {
            log::warn!("explorer busy; dropping {:?}", action);
            return;
        };
        explorer.dispatch(action);
        if let Some(mounted) = &self.mounted {
            mounted.ui.refresh(&explorer.view());
        }
    }
}

impl Drop for GeometryExplorer {
    fn drop(&mut self) {
        self.unmount();
        self.frame_callback.borrow_mut().take();
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Setup panic hook for better error messages in browser console
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    Ok(())
}
