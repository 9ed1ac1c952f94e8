//! Read-only DOM surface used by the locator and the extractor
//!
//! The core never touches a concrete DOM. Everything it needs is expressed by
//! [`MathNode`], which is implemented for:
//! - [`HtmlNode`]: nodes of a static document parsed with `scraper`
//! - `WebNode`: live browser nodes via `web-sys` (feature `wasm`)

pub mod html;
#[cfg(feature = "wasm")]
pub mod web;

pub use html::{HtmlDocument, HtmlNode};
#[cfg(feature = "wasm")]
pub use web::WebNode;

use serde::{Deserialize, Serialize};

/// Viewport rectangle of a rendered element, in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// A node of some DOM tree, seen through the handful of properties needed to
/// classify formulas and pull LaTeX out of them.
///
/// Equality is node identity: two handles compare equal when they refer to
/// the same node of the same tree.
pub trait MathNode: Clone + PartialEq {
    /// True for element nodes; false for text, comments, documents.
    fn is_element(&self) -> bool;

    /// Lowercase local tag name, `None` for non-elements.
    fn tag_name(&self) -> Option<String>;

    /// Raw class attribute. For SVG elements this is the animated string's
    /// base value.
    fn class_name(&self) -> Option<String>;

    /// Attribute value by name, `None` when absent or not an element.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Closest ancestor that is an element.
    fn parent_element(&self) -> Option<Self>;

    /// Concatenated text of the node and all its descendants.
    fn text_content(&self) -> String;

    /// All descendant elements in document order, excluding the node itself.
    fn descendant_elements(&self) -> Vec<Self>;

    /// Layout box, when the backend has one.
    fn bounding_rect(&self) -> Option<Rect> {
        None
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// First descendant element accepted by `pred`.
    fn find_descendant<F>(&self, mut pred: F) -> Option<Self>
    where
        F: FnMut(&Self) -> bool,
    {
        self.descendant_elements().into_iter().find(|n| pred(n))
    }
}
