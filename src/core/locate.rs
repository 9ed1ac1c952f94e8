//! Formula locator
//!
//! Given whatever node the pointer is over (often a single glyph span deep
//! inside a KaTeX or MathJax fragment), find the element that stands for the
//! whole rendered expression.

use phf::phf_set;
use tracing::trace;

use crate::dom::MathNode;
use crate::options::GrabOptions;

/// Classes set by well-known math renderers on their container elements
pub static RENDERER_CLASSES: phf::Set<&'static str> = phf_set! {
    "katex",
    "katex-display",
    "MathJax",
    "MathJax_Display",
    "math-container",
};

/// Attributes whose mere presence marks an element as carrying LaTeX
pub const SOURCE_MARKER_ATTRIBUTES: [&str; 2] = ["data-latex", "data-tex"];

/// Whether `node` is an element that represents a rendered formula.
///
/// Text nodes, comments and documents are never formulas.
pub fn is_formula<N: MathNode>(node: &N) -> bool {
    if !node.is_element() {
        return false;
    }

    if let Some(class_name) = node.class_name() {
        if class_name.split_whitespace().any(is_formula_class) {
            return true;
        }
    }

    if node.tag_name().as_deref() == Some("math") {
        return true;
    }

    SOURCE_MARKER_ATTRIBUTES
        .iter()
        .any(|attr| node.has_attribute(attr))
}

/// Class token test: known renderer classes, plus site-specific conventions
/// such as `math-inline`, `ltx_equation`, `formula-block`.
fn is_formula_class(token: &str) -> bool {
    if RENDERER_CLASSES.contains(token) || token.starts_with("math-") {
        return true;
    }
    let lower = token.to_ascii_lowercase();
    lower.contains("equation") || lower.contains("formula")
}

/// Outermost formula element among `node` and its ancestors, within the
/// default depth bound.
pub fn locate<N: MathNode>(node: &N) -> Option<N> {
    locate_with_options(node, &GrabOptions::default())
}

/// Outermost formula element among `node` and its first
/// `options.max_depth - 1` ancestors.
///
/// Running out of depth is not an error; the best match so far is returned.
pub fn locate_with_options<N: MathNode>(node: &N, options: &GrabOptions) -> Option<N> {
    let mut outermost = None;
    let mut current = Some(node.clone());
    let mut depth = 0;

    while let Some(candidate) = current {
        if depth >= options.max_depth {
            trace!(depth, "locate: depth bound reached");
            break;
        }
        if is_formula(&candidate) {
            trace!(depth, tag = ?candidate.tag_name(), "locate: formula ancestor");
            current = candidate.parent_element();
            outermost = Some(candidate);
        } else {
            current = candidate.parent_element();
        }
        depth += 1;
    }

    outermost
}

/// Every outermost formula under `root` (inclusive), in document order and
/// without duplicates.
pub fn find_formulas<N: MathNode>(root: &N, options: &GrabOptions) -> Vec<N> {
    let mut found: Vec<N> = Vec::new();
    let candidates = std::iter::once(root.clone()).chain(root.descendant_elements());

    for candidate in candidates {
        if !is_formula(&candidate) || within_any(&candidate, &found) {
            continue;
        }
        let Some(outer) = locate_with_options(&candidate, options) else {
            continue;
        };
        if !found.contains(&outer) {
            found.push(outer);
        }
    }

    found
}

/// True when `node` is one of `formulas` or lies inside one of them.
///
/// Candidates arrive in document order, so an enclosing formula is always
/// found before anything nested in it, however deep.
fn within_any<N: MathNode>(node: &N, formulas: &[N]) -> bool {
    let mut current = Some(node.clone());
    while let Some(n) = current {
        if formulas.contains(&n) {
            return true;
        }
        current = n.parent_element();
    }
    false
}
