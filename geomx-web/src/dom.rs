//! DOM plumbing: the mount container and self-removing event listeners.

use geomx_core::{Container, Result, ViewerError};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, HtmlCanvasElement, HtmlElement, Node, Window};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| ViewerError::SurfaceUnavailable("no global `window`".into()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| ViewerError::SurfaceUnavailable("window has no document".into()))
}

pub fn js_error(context: &str, err: JsValue) -> ViewerError {
    ViewerError::Backend(format!("{}: {:?}", context, err))
}

/// Create an element of `tag` with an inline style
pub fn element(document: &Document, tag: &str, style: &str) -> Result<HtmlElement> {
    let element = document
        .create_element(tag)
        .map_err(|err| js_error("create element", err))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| js_error("create element", "not an HTML element".into()))?;
    element
        .set_attribute("style", style)
        .map_err(|err| js_error("set style", err))?;
    Ok(element)
}

/// The element the canvas is mounted into
pub struct ElementContainer {
    element: HtmlElement,
}

impl ElementContainer {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }
}

impl Container for ElementContainer {
    type Surface = HtmlCanvasElement;

    fn size(&self) -> (f64, f64) {
        let rect = self.element.get_bounding_client_rect();
        (rect.width(), rect.height())
    }

    fn pixel_ratio(&self) -> f64 {
        web_sys::window().map_or(1.0, |w| w.device_pixel_ratio())
    }

    fn attach(&self, surface: &HtmlCanvasElement) -> Result<()> {
        self.element
            .append_child(surface)
            .map(|_| ())
            .map_err(|err| js_error("attach canvas", err))
    }

    fn detach(&self, surface: &HtmlCanvasElement) -> Result<()> {
        self.element
            .remove_child(surface)
            .map(|_| ())
            .map_err(|err| js_error("detach canvas", err))
    }

    fn contains(&self, surface: &HtmlCanvasElement) -> bool {
        let node: &Node = surface;
        self.element.contains(Some(node))
    }
}

/// An event listener that unregisters itself when dropped
pub struct EventListener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|err| js_error("add listener", err))?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove {} listener: {:?}", self.kind, err);
        }
    }
}
