//! `requestAnimationFrame` scheduling

use crate::dom::js_error;
use geomx_core::{FrameScheduler, Result, ViewerError};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Slot for the per-frame callback. It is filled after the explorer exists,
/// since the callback itself needs a handle back to the explorer.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }

    /// Shared handle to the callback slot
    pub fn callback(&self) -> FrameCallback {
        Rc::clone(&self.callback)
    }
}

impl FrameScheduler for RafScheduler {
    type Token = i32;

    fn request_frame(&mut self) -> Result<i32> {
        let slot = self.callback.borrow();
        let callback = slot
            .as_ref()
            .ok_or_else(|| ViewerError::Scheduler("frame callback not installed".into()))?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|err| js_error("requestAnimationFrame", err))
    }

    fn cancel_frame(&mut self, token: i32) {
        if let Err(err) = self.window.cancel_animation_frame(token) {
            log::debug!("cancelAnimationFrame({}) failed: {:?}", token, err);
        }
    }
}
