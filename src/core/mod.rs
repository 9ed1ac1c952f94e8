//! Formula detection and LaTeX recovery
//!
//! This module holds the two operations everything else is built on:
//! - [`locate`]: pointer target → outermost formula element
//! - [`extract`]: formula element → LaTeX string
//!
//! Both are pure reads of the DOM and never fail.

pub mod extract;
pub mod locate;
pub mod unicode;

pub use extract::{
    extract, extract_detailed, extract_with_options, strip_math_delimiters, Extraction, Strategy,
};
pub use locate::{find_formulas, is_formula, locate, locate_with_options, RENDERER_CLASSES};
pub use unicode::unicode_to_latex;
