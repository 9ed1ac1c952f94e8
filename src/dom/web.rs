//! `MathNode` over live browser nodes

use wasm_bindgen::JsCast;
use web_sys::{Element, Node, SvgElement};

use super::{MathNode, Rect};

/// Handle to a node of the page's DOM
#[derive(Debug, Clone, PartialEq)]
pub struct WebNode(Node);

impl WebNode {
    pub fn new(node: Node) -> Self {
        Self(node)
    }

    pub fn into_node(self) -> Node {
        self.0
    }

    fn element(&self) -> Option<&Element> {
        self.0.dyn_ref::<Element>()
    }
}

impl From<Node> for WebNode {
    fn from(node: Node) -> Self {
        Self(node)
    }
}

impl From<Element> for WebNode {
    fn from(element: Element) -> Self {
        Self(element.into())
    }
}

impl MathNode for WebNode {
    fn is_element(&self) -> bool {
        self.0.node_type() == Node::ELEMENT_NODE
    }

    fn tag_name(&self) -> Option<String> {
        self.element().map(|el| el.local_name().to_ascii_lowercase())
    }

    fn class_name(&self) -> Option<String> {
        let el = self.element()?;
        // SVG exposes className as an SVGAnimatedString
        if let Some(svg) = el.dyn_ref::<SvgElement>() {
            return Some(svg.class_name().base_val());
        }
        Some(el.class_name())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element()?.get_attribute(name)
    }

    fn parent_element(&self) -> Option<Self> {
        self.0.parent_element().map(WebNode::from)
    }

    fn text_content(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn descendant_elements(&self) -> Vec<Self> {
        let Some(el) = self.element() else {
            return Vec::new();
        };
        let Ok(list) = el.query_selector_all("*") else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .map(WebNode)
            .collect()
    }

    fn bounding_rect(&self) -> Option<Rect> {
        let rect = self.element()?.get_bounding_client_rect();
        Some(Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom()))
    }
}
