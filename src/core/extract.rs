//! LaTeX extractor
//!
//! Formula containers come in many shapes: MathJax keeps the source in a
//! `<script type="math/tex">`, KaTeX in a MathML `<annotation>`, other sites
//! in `data-latex` attributes or plain `$...$` text. Strategies are tried in
//! a fixed order and the first one that finds something wins. When nothing
//! authoritative exists the rendered text is converted heuristically.
//!
//! Every strategy checks its own preconditions, so a partially rendered or
//! concurrently mutated tree only makes later strategies run.

use serde::Serialize;
use tracing::debug;

use super::unicode::unicode_to_latex;
use crate::dom::MathNode;
use crate::options::GrabOptions;

/// MIME marker of MathJax source scripts
const TEX_SCRIPT_TYPE: &str = "math/tex";
/// Encoding of the TeX annotation in KaTeX/MathML output
const TEX_ANNOTATION_ENCODING: &str = "application/x-tex";
const ARIA_LABEL: &str = "aria-label";

/// Where an extracted string came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// `<script type="math/tex">` descendant
    ScriptTag,
    /// `<annotation encoding="application/x-tex">` descendant
    Annotation,
    /// One of the configured LaTeX attributes
    Attribute,
    /// `aria-label` containing a control sequence
    AriaLabel,
    /// Any `<script>` whose type mentions math
    MathScript,
    /// Rendered text wrapped in `$...$` or `$$...$$`
    DelimitedText,
    /// Rendered text run through the Unicode converter
    UnicodeHeuristic,
    /// Rendered text, untouched
    RenderedText,
}

impl Strategy {
    /// Strategies tried before falling back to rendered text, in order
    pub const CHAIN: [Strategy; 6] = [
        Strategy::ScriptTag,
        Strategy::Annotation,
        Strategy::Attribute,
        Strategy::AriaLabel,
        Strategy::MathScript,
        Strategy::DelimitedText,
    ];

    /// Whether strings from this strategy are real LaTeX source
    pub fn is_exact(self) -> bool {
        !matches!(self, Strategy::UnicodeHeuristic | Strategy::RenderedText)
    }

    fn apply<N: MathNode>(self, node: &N, options: &GrabOptions) -> Option<String> {
        match self {
            Strategy::ScriptTag => script_text(node, |ty| ty.contains(TEX_SCRIPT_TYPE)),
            Strategy::Annotation => node
                .find_descendant(|n| {
                    n.tag_name().as_deref() == Some("annotation")
                        && n.attribute("encoding").as_deref() == Some(TEX_ANNOTATION_ENCODING)
                })
                .map(|n| n.text_content().trim().to_string()),
            Strategy::Attribute => options
                .latex_attributes
                .iter()
                .find_map(|attr| latex_attribute(node, attr)),
            Strategy::AriaLabel => latex_attribute(node, ARIA_LABEL),
            Strategy::MathScript => script_text(node, |ty| ty.contains("math")),
            Strategy::DelimitedText => strip_math_delimiters(node.text_content().trim()),
            // fallbacks never decline
            Strategy::UnicodeHeuristic | Strategy::RenderedText => None,
        }
    }
}

/// An extracted string and the strategy that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub latex: String,
    pub strategy: Strategy,
}

impl Extraction {
    fn new(latex: String, strategy: Strategy) -> Self {
        Self { latex, strategy }
    }

    pub fn is_exact(&self) -> bool {
        self.strategy.is_exact()
    }
}

/// Best-effort LaTeX source of a formula element. Never fails.
pub fn extract<N: MathNode>(node: &N) -> String {
    extract_with_options(node, &GrabOptions::default())
}

pub fn extract_with_options<N: MathNode>(node: &N, options: &GrabOptions) -> String {
    extract_detailed(node, options).latex
}

/// Like [`extract`], also reporting which strategy answered.
pub fn extract_detailed<N: MathNode>(node: &N, options: &GrabOptions) -> Extraction {
    for strategy in Strategy::CHAIN {
        if let Some(latex) = strategy.apply(node, options) {
            debug!(?strategy, latex = %latex, "extracted formula source");
            return Extraction::new(latex, strategy);
        }
    }

    let text = node.text_content().trim().to_string();
    if options.unicode_fallback {
        let converted = unicode_to_latex(&text);
        if converted != text {
            debug!(text = %text, latex = %converted, "converted rendered text");
            return Extraction::new(converted, Strategy::UnicodeHeuristic);
        }
    }

    debug!(text = %text, "no LaTeX source, using rendered text");
    Extraction::new(text, Strategy::RenderedText)
}

/// Trimmed text of the first descendant `<script>` whose type satisfies
/// `accept`.
fn script_text<N, F>(node: &N, accept: F) -> Option<String>
where
    N: MathNode,
    F: Fn(&str) -> bool,
{
    node.find_descendant(|n| {
        n.tag_name().as_deref() == Some("script")
            && n.attribute("type").is_some_and(|ty| accept(&ty))
    })
    .map(|n| n.text_content().trim().to_string())
}

/// Trimmed attribute value, if it looks like LaTeX (has a backslash).
fn latex_attribute<N: MathNode>(node: &N, name: &str) -> Option<String> {
    node.attribute(name)
        .filter(|value| value.contains('\\'))
        .map(|value| value.trim().to_string())
}

/// Inner text of `$$...$$` or `$...$`, `None` when not delimited.
pub fn strip_math_delimiters(text: &str) -> Option<String> {
    if text.len() >= 4 && text.starts_with("$$") && text.ends_with("$$") {
        return Some(text[2..text.len() - 2].trim().to_string());
    }
    if text.len() > 2 && text.starts_with('$') && text.ends_with('$') {
        return Some(text[1..text.len() - 1].trim().to_string());
    }
    None
}
