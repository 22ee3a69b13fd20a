//! UI-level view state and the bridge that turns UI actions into scene commands.

use crate::catalog::Catalog;
use crate::storage::{encode_bool, KeyValueStore, AUTO_ROTATE_KEY, WIREFRAME_KEY};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub selected_shape: &'static str,
    pub wireframe: bool,
    pub auto_rotate: bool,
}

impl ViewState {
    /// Read the persisted toggles; the selected shape always starts at the
    /// first catalog entry
    pub fn restore(store: &dyn KeyValueStore) -> Self {
        Self {
            selected_shape: Catalog::first().id,
            wireframe: store.get(WIREFRAME_KEY).as_deref() == Some("true"),
            auto_rotate: store.get(AUTO_ROTATE_KEY).as_deref() != Some("false"),
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selected_shape: Catalog::first().id,
            wireframe: false,
            auto_rotate: true,
        }
    }
}

/// The single cell written by the bridge and read by the render loop
pub type SharedViewState = Rc<Cell<ViewState>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    ToggleAutoRotate,
    ToggleWireframe,
    SelectShape(String),
}

/// Work the scene must do after a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    SetWireframe(bool),
    SetShape(&'static str),
}

pub struct StateBridge {
    state: SharedViewState,
    store: Box<dyn KeyValueStore>,
}

impl StateBridge {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        let initial = ViewState::restore(store.as_ref());
        log::debug!("restored view state {:?}", initial);
        Self {
            state: Rc::new(Cell::new(initial)),
            store,
        }
    }

    pub fn state(&self) -> &SharedViewState {
        &self.state
    }

    pub fn view(&self) -> ViewState {
        self.state.get()
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }

    pub fn apply(&mut self, action: ViewAction) -> Option<SceneCommand> {
        let mut view = self.state.get();
        let command = match action {
            ViewAction::ToggleAutoRotate => {
                view.auto_rotate = !view.auto_rotate;
                self.persist(AUTO_ROTATE_KEY, view.auto_rotate);
                None
            }
            ViewAction::ToggleWireframe => {
                view.wireframe = !view.wireframe;
                self.persist(WIREFRAME_KEY, view.wireframe);
                Some(SceneCommand::SetWireframe(view.wireframe))
            }
            ViewAction::SelectShape(id) => {
                let Some(shape) = Catalog::get(&id) else {
                    log::warn!("ignoring unknown shape {:?}", id);
                    return None;
                };
                if shape.id == view.selected_shape {
                    return None;
                }
                view.selected_shape = shape.id;
                Some(SceneCommand::SetShape(shape.id))
            }
        };
        self.state.set(view);
        command
    }

    fn persist(&mut self, key: &str, value: bool) {
        if let Err(err) = self.store.set(key, encode_bool(value)) {
            log::debug!("could not persist {}: {}", key, err);
        }
    }
}
