//! `MathNode` over static HTML parsed with `scraper`

use ego_tree::NodeRef;
use scraper::{Html, Node, Selector};

use super::MathNode;
use crate::utils::error::{GrabError, GrabResult};

/// An owned, parsed HTML document
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a full document (missing `<html>`/`<body>` are synthesized).
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// Parse a fragment such as a copied `<span class="katex">...</span>`.
    pub fn parse_fragment(source: &str) -> Self {
        Self {
            html: Html::parse_fragment(source),
        }
    }

    /// The document node itself.
    pub fn root(&self) -> HtmlNode<'_> {
        HtmlNode(self.html.tree.root())
    }

    /// All elements matching a CSS selector, in document order.
    pub fn select(&self, selector: &str) -> GrabResult<Vec<HtmlNode<'_>>> {
        let parsed =
            Selector::parse(selector).map_err(|e| GrabError::selector(selector, e.to_string()))?;
        Ok(self
            .html
            .select(&parsed)
            .map(|el| HtmlNode(*el))
            .collect())
    }

    /// First element matching a CSS selector.
    pub fn select_first(&self, selector: &str) -> GrabResult<Option<HtmlNode<'_>>> {
        Ok(self.select(selector)?.into_iter().next())
    }
}

impl std::fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlDocument")
            .field("nodes", &self.html.tree.values().count())
            .finish()
    }
}

/// Handle to any node (element, text, comment, ...) of an [`HtmlDocument`]
#[derive(Clone, Copy, PartialEq)]
pub struct HtmlNode<'a>(NodeRef<'a, Node>);

impl<'a> HtmlNode<'a> {
    /// Child nodes of any kind, including text.
    pub fn children(&self) -> impl Iterator<Item = HtmlNode<'a>> {
        self.0.children().map(HtmlNode)
    }
}

impl std::fmt::Debug for HtmlNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.value() {
            Node::Element(el) => write!(f, "<{}>", el.name()),
            Node::Text(text) => write!(f, "#text {:?}", &**text),
            Node::Comment(_) => write!(f, "#comment"),
            _ => write!(f, "#document"),
        }
    }
}

impl<'a> MathNode for HtmlNode<'a> {
    fn is_element(&self) -> bool {
        self.0.value().is_element()
    }

    fn tag_name(&self) -> Option<String> {
        self.0
            .value()
            .as_element()
            .map(|el| el.name().to_ascii_lowercase())
    }

    fn class_name(&self) -> Option<String> {
        self.attribute("class")
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0
            .value()
            .as_element()
            .and_then(|el| el.attr(name))
            .map(str::to_owned)
    }

    fn parent_element(&self) -> Option<Self> {
        self.0
            .ancestors()
            .find(|n| n.value().is_element())
            .map(HtmlNode)
    }

    fn text_content(&self) -> String {
        match self.0.value() {
            Node::Text(text) => (**text).to_owned(),
            Node::Comment(comment) => (**comment).to_owned(),
            _ => self
                .0
                .descendants()
                .filter_map(|n| n.value().as_text().map(|t| &**t))
                .collect(),
        }
    }

    fn descendant_elements(&self) -> Vec<Self> {
        self.0
            .descendants()
            .skip(1)
            .filter(|n| n.value().is_element())
            .map(HtmlNode)
            .collect()
    }
}
