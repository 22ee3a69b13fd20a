//! Sidebar, stage and floating toggle buttons around the canvas.

use crate::dom::{element, js_error};
use geomx_core::{Catalog, Result, ViewState};
use web_sys::{Document, HtmlElement};

const ROOT_STYLE: &str = "display: flex; width: 100%; height: 100%; \
    font-family: system-ui, sans-serif; color: #e0e0e0; background: #0a0a0a";
const SIDEBAR_STYLE: &str = "width: 200px; flex-shrink: 0; padding: 12px; \
    box-sizing: border-box; overflow-y: auto; background: #141414; border-right: 1px solid #222";
const STAGE_STYLE: &str = "position: relative; flex: 1; min-width: 0; overflow: hidden";
const TOGGLES_STYLE: &str = "position: absolute; top: 12px; right: 12px; display: flex; gap: 8px";
const BUTTON_STYLE: &str = "display: block; width: 100%; margin-bottom: 6px; padding: 8px 10px; \
    text-align: left; cursor: pointer; border-radius: 4px; font: inherit";
const CATEGORY_STYLE: &str = "display: block; font-size: 11px; opacity: 0.7";
const TOGGLE_STYLE: &str = "padding: 6px 12px; cursor: pointer; border-radius: 4px; font: inherit";

/// Colours for a button in its active and idle states
fn button_colors(active: bool, accent: &str) -> String {
    if active {
        format!("background: {}; color: #0a0a0a; border: 1px solid {}", accent, accent)
    } else {
        "background: #1e1e1e; color: #e0e0e0; border: 1px solid #333".to_string()
    }
}

pub fn toggle_label(name: &str, enabled: bool) -> String {
    format!("{}: {}", name, if enabled { "On" } else { "Off" })
}

pub struct Ui {
    pub root: HtmlElement,
    pub stage: HtmlElement,
    pub shape_buttons: Vec<(&'static str, HtmlElement)>,
    pub rotate_button: HtmlElement,
    pub wireframe_button: HtmlElement,
}

impl Ui {
    pub fn build(document: &Document) -> Result<Self> {
        let root = element(document, "div", ROOT_STYLE)?;
        let sidebar = element(document, "nav", SIDEBAR_STYLE)?;
        let stage = element(document, "div", STAGE_STYLE)?;
        let toggles = element(document, "div", TOGGLES_STYLE)?;

        let heading = element(document, "h2", "margin: 0 0 12px; font-size: 16px")?;
        heading.set_text_content(Some("Shapes"));
        append(&sidebar, &heading)?;

        let mut shape_buttons = Vec::with_capacity(Catalog::len());
        for shape in Catalog::iter() {
            let button = element(document, "button", BUTTON_STYLE)?;
            button.set_text_content(Some(shape.display_name));
            button.set_title(shape.description);
            let category = element(document, "small", CATEGORY_STYLE)?;
            category.set_text_content(Some(shape.category));
            append(&button, &category)?;
            button.set_attribute("data-shape", shape.id).map_err(|err| js_error("set attribute", err))?;
            append(&sidebar, &button)?;
            shape_buttons.push((shape.id, button));
        }

        let rotate_button = element(document, "button", TOGGLE_STYLE)?;
        let wireframe_button = element(document, "button", TOGGLE_STYLE)?;
        append(&toggles, &rotate_button)?;
        append(&toggles, &wireframe_button)?;

        append(&stage, &toggles)?;
        append(&root, &sidebar)?;
        append(&root, &stage)?;

        Ok(Self {
            root,
            stage,
            shape_buttons,
            rotate_button,
            wireframe_button,
        })
    }

    /// Reflect `view` in the button highlights and labels
    pub fn refresh(&self, view: &ViewState) {
        for (id, button) in &self.shape_buttons {
            let active = *id == view.selected_shape;
            let accent = Catalog::get(id).map(|shape| shape.color().to_css()).unwrap_or_default();
            restyle(button, BUTTON_STYLE, &button_colors(active, &accent));
            if let Err(err) = button.class_list().toggle_with_force("active", active) {
                log::debug!("class toggle failed: {:?}", err);
            }
        }

        self.rotate_button
            .set_text_content(Some(&toggle_label("Auto-Rotate", view.auto_rotate)));
        restyle(&self.rotate_button, TOGGLE_STYLE, &button_colors(view.auto_rotate, "#4f9dff"));

        self.wireframe_button
            .set_text_content(Some(&toggle_label("Wireframe", view.wireframe)));
        restyle(&self.wireframe_button, TOGGLE_STYLE, &button_colors(view.wireframe, "#4f9dff"));
    }
}

fn append(parent: &HtmlElement, child: &HtmlElement) -> Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|err| js_error("append element", err))
}

fn restyle(button: &HtmlElement, base: &str, colors: &str) {
    if let Err(err) = button.set_attribute("style", &format!("{}; {}", base, colors)) {
        log::debug!("restyle failed: {:?}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_label() {
        assert_eq!(toggle_label("Wireframe", true), "Wireframe: On");
        assert_eq!(toggle_label("Auto-Rotate", false), "Auto-Rotate: Off");
    }

    #[test]
    fn test_active_button_uses_accent() {
        let colors = button_colors(true, "#ff6b6b");
        assert!(colors.contains("background: #ff6b6b"));
        assert!(!button_colors(false, "#ff6b6b").contains("#ff6b6b"));
    }
}
