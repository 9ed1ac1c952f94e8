//! WASM bindings for texgrab
//!
//! This module provides JavaScript-accessible functions for a content script:
//! formula lookup on live DOM nodes, LaTeX extraction, and a `FormulaCopier`
//! object that keeps the copy control's state between events. The script
//! itself owns event listeners, the button element and `navigator.clipboard`.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;
#[cfg(feature = "wasm")]
use wasm_bindgen::JsCast;
#[cfg(feature = "wasm")]
use web_sys::{Element, Node};

#[cfg(feature = "wasm")]
use serde::Serialize;

#[cfg(feature = "wasm")]
use crate::controller::CopyController;
#[cfg(feature = "wasm")]
use crate::dom::WebNode;
#[cfg(feature = "wasm")]
use crate::options::GrabOptions;
#[cfg(feature = "wasm")]
use crate::utils::error::GrabError;

/// Error object handed to JavaScript when a value cannot be serialized
#[cfg(feature = "wasm")]
#[derive(Serialize)]
struct WasmError {
    error: String,
}

/// Safely serialize a value to JsValue, returning an error object on failure.
#[cfg(feature = "wasm")]
fn to_js_value<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or_else(|e| {
        let error_obj = WasmError {
            error: format!("Serialization error: {}", e),
        };
        serde_wasm_bindgen::to_value(&error_obj).unwrap_or(JsValue::NULL)
    })
}

/// Options from a JS object; missing keys and `undefined` fall back to defaults
#[cfg(feature = "wasm")]
fn options_from_js(options: JsValue) -> GrabOptions {
    if options.is_undefined() || options.is_null() {
        return GrabOptions::default();
    }
    serde_wasm_bindgen::from_value(options).unwrap_or_default()
}

#[cfg(feature = "wasm")]
fn into_element(node: WebNode) -> Option<Element> {
    node.into_node().dyn_into::<Element>().ok()
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Whether a node is a formula container
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "isFormula")]
pub fn is_formula_wasm(node: &Node) -> bool {
    crate::is_formula(&WebNode::new(node.clone()))
}

/// Outermost formula element around a pointer target
///
/// # Arguments
/// * `node` - Event target (element or text node)
/// * `max_depth` - Optional bound on the ancestor walk (default 20)
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "locateFormula")]
pub fn locate_formula_wasm(node: &Node, max_depth: Option<u32>) -> Option<Element> {
    let mut options = GrabOptions::default();
    if let Some(depth) = max_depth {
        options.max_depth = depth as usize;
    }
    crate::locate_with_options(&WebNode::new(node.clone()), &options).and_then(into_element)
}

/// LaTeX source of a formula element
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "extractLatex")]
pub fn extract_latex_wasm(node: &Node) -> String {
    crate::extract(&WebNode::new(node.clone()))
}

/// LaTeX source plus the strategy that produced it
///
/// # Returns
/// `{ latex, strategy }`
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "extractLatexDetailed")]
pub fn extract_latex_detailed_wasm(node: &Node, options: JsValue) -> JsValue {
    let options = options_from_js(options);
    to_js_value(&crate::extract_detailed(&WebNode::new(node.clone()), &options))
}

/// Heuristic Unicode → LaTeX conversion of rendered text
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "unicodeToLatex")]
pub fn unicode_to_latex_wasm(input: &str) -> String {
    crate::unicode_to_latex(input)
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Copy control state for one page session
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct FormulaCopier {
    controller: CopyController<WebNode>,
    pending: Option<String>,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl FormulaCopier {
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> FormulaCopier {
        FormulaCopier {
            controller: CopyController::new(options_from_js(options)),
            pending: None,
        }
    }

    /// `mouseover` handler. Returns true when the control moved.
    #[wasm_bindgen(js_name = "pointerOver")]
    pub fn pointer_over(&mut self, target: Node) -> bool {
        self.controller.pointer_over(&WebNode::new(target))
    }

    /// `mouseout` handler.
    #[wasm_bindgen(js_name = "pointerOut")]
    pub fn pointer_out(&mut self, target: Node, related: Option<Node>, into_button: bool, now_ms: f64) {
        let related = related.map(WebNode::new);
        self.controller
            .pointer_out(&WebNode::new(target), related.as_ref(), into_button, now_ms);
    }

    /// Document `click` handler.
    pub fn click(&mut self, on_button: bool) {
        self.controller.click(on_button);
    }

    /// Timer callback; pass whether the control is hovered.
    pub fn tick(&mut self, now_ms: f64, button_hovered: bool) {
        self.controller.tick(now_ms, button_hovered);
    }

    /// Text to hand to `navigator.clipboard.writeText`, if a formula is active.
    #[wasm_bindgen(js_name = "beginCopy")]
    pub fn begin_copy(&mut self) -> Option<String> {
        self.pending = self.controller.begin_copy();
        self.pending.clone()
    }

    /// Report the outcome of the clipboard promise.
    #[wasm_bindgen(js_name = "finishCopy")]
    pub fn finish_copy(&mut self, ok: bool, error: Option<String>, now_ms: f64) {
        let Some(latex) = self.pending.take() else {
            return;
        };
        let result = if ok {
            Ok(())
        } else {
            Err(GrabError::clipboard(
                error.unwrap_or_else(|| "write rejected".to_string()),
            ))
        };
        self.controller.finish_copy(latex, result, now_ms);
    }

    /// `{ visible, left, top, status, label, tooltip }`
    pub fn button(&self) -> JsValue {
        to_js_value(&self.controller.button())
    }

    /// The formula element the control is attached to
    #[wasm_bindgen(getter)]
    pub fn formula(&self) -> Option<Element> {
        self.controller.current().cloned().and_then(into_element)
    }
}
