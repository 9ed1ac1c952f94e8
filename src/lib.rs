//! texgrab: locate rendered math formulas and recover their LaTeX source
//!
//! Given any node on a page (usually the pointer's target), texgrab finds the
//! element that represents the whole formula and pulls the best available
//! LaTeX out of it: MathJax source scripts, KaTeX annotations, `data-latex`
//! attributes, `$...$` text, or, as a last resort, a heuristic conversion of
//! the rendered Unicode glyphs.
//!
//! The DOM is abstracted by [`MathNode`]; static HTML is supported through
//! [`HtmlDocument`] and live browser nodes through the `wasm` feature.
//!
//! # Example
//!
//! ```
//! use texgrab::{extract, locate, HtmlDocument};
//!
//! let doc = HtmlDocument::parse(
//!     r#"<span class="katex"><span class="katex-mathml"><math><semantics>
//!          <mi>x</mi>
//!          <annotation encoding="application/x-tex">\frac{1}{2}</annotation>
//!        </semantics></math></span><span class="mord" id="glyph">x</span></span>"#,
//! );
//! let glyph = doc.select_first("#glyph").unwrap().unwrap();
//! let formula = locate(&glyph).unwrap();
//! assert_eq!(extract(&formula), r"\frac{1}{2}");
//! ```

pub mod clipboard;
pub mod controller;
pub mod core;
pub mod dom;
pub mod options;
pub mod utils;
pub mod wasm;

pub use clipboard::{Clipboard, MemoryClipboard};
#[cfg(feature = "clipboard")]
pub use clipboard::SystemClipboard;
pub use controller::{ButtonState, CopyController, CopyOutcome, CopyStatus};
pub use crate::core::{
    extract, extract_detailed, extract_with_options, find_formulas, is_formula, locate,
    locate_with_options, strip_math_delimiters, unicode_to_latex, Extraction, Strategy,
};
pub use dom::{HtmlDocument, HtmlNode, MathNode, Rect};
#[cfg(feature = "wasm")]
pub use dom::WebNode;
pub use options::{ButtonOptions, GrabOptions};
pub use utils::error::{GrabError, GrabResult};

/// Extract LaTeX from every formula in an HTML document, in document order.
pub fn extract_all_from_html(source: &str, options: &GrabOptions) -> Vec<Extraction> {
    let doc = HtmlDocument::parse(source);
    find_formulas(&doc.root(), options)
        .iter()
        .map(|node| extract_detailed(node, options))
        .collect()
}
