//! Heuristic Unicode → LaTeX conversion for rendered formula text
//!
//! When a formula carries no machine-readable source, the only thing left is
//! what the renderer painted: Greek glyphs, operator symbols, superscript
//! digits. This module rewrites such text into LaTeX-looking source through
//! an ordered table of named rules. The result is an approximation.
//!
//! Rules run in table order, then the exponent repair rules run. Every rule
//! is a no-op on text it does not recognize, and the whole pipeline is
//! idempotent on its own output.

use lazy_static::lazy_static;
use phf::phf_map;
use regex::{Captures, Regex};

/// Zero-width and invisible operator characters emitted by math renderers
static INVISIBLE: phf::Map<char, &'static str> = phf_map! {
    '\u{200B}' => "",
    '\u{200C}' => "",
    '\u{200D}' => "",
    '\u{2060}' => "",
    '\u{2061}' => "",
    '\u{2062}' => "",
    '\u{2063}' => "",
    '\u{FEFF}' => "",
};

static GREEK: phf::Map<char, &'static str> = phf_map! {
    'α' => "\\alpha",
    'β' => "\\beta",
    'γ' => "\\gamma",
    'δ' => "\\delta",
    'ε' => "\\varepsilon",
    'ϵ' => "\\epsilon",
    'ζ' => "\\zeta",
    'η' => "\\eta",
    'θ' => "\\theta",
    'ϑ' => "\\vartheta",
    'ι' => "\\iota",
    'κ' => "\\kappa",
    'λ' => "\\lambda",
    'μ' => "\\mu",
    'ν' => "\\nu",
    'ξ' => "\\xi",
    'π' => "\\pi",
    'ρ' => "\\rho",
    'σ' => "\\sigma",
    'ς' => "\\varsigma",
    'τ' => "\\tau",
    'υ' => "\\upsilon",
    'φ' => "\\varphi",
    'ϕ' => "\\phi",
    'χ' => "\\chi",
    'ψ' => "\\psi",
    'ω' => "\\omega",
    'Γ' => "\\Gamma",
    'Δ' => "\\Delta",
    'Θ' => "\\Theta",
    'Λ' => "\\Lambda",
    'Ξ' => "\\Xi",
    'Π' => "\\Pi",
    'Σ' => "\\Sigma",
    'Φ' => "\\Phi",
    'Ψ' => "\\Psi",
    'Ω' => "\\Omega",
};

static OPERATORS: phf::Map<char, &'static str> = phf_map! {
    '∞' => "\\infty",
    '∑' => "\\sum",
    '∏' => "\\prod",
    '∫' => "\\int",
    '∮' => "\\oint",
    '√' => "\\sqrt",
    '±' => "\\pm",
    '∓' => "\\mp",
    '×' => "\\times",
    '÷' => "\\div",
    '·' => "\\cdot",
    '⋅' => "\\cdot",
    '≤' => "\\leq",
    '≥' => "\\geq",
    '≠' => "\\neq",
    '≈' => "\\approx",
    '≡' => "\\equiv",
    '∝' => "\\propto",
    '∂' => "\\partial",
    '∇' => "\\nabla",
    '∈' => "\\in",
    '∉' => "\\notin",
    '⊂' => "\\subset",
    '⊆' => "\\subseteq",
    '∪' => "\\cup",
    '∩' => "\\cap",
    '∅' => "\\emptyset",
    '∀' => "\\forall",
    '∃' => "\\exists",
    '→' => "\\to",
    '←' => "\\leftarrow",
    '⇒' => "\\Rightarrow",
    '⇔' => "\\Leftrightarrow",
    '⊗' => "\\otimes",
    '⟨' => "\\langle",
    '⟩' => "\\rangle",
    '…' => "\\ldots",
    '⋯' => "\\cdots",
    '−' => "-",
    '′' => "'",
};

static SUPERSCRIPT_DIGITS: phf::Map<char, char> = phf_map! {
    '⁰' => '0',
    '¹' => '1',
    '²' => '2',
    '³' => '3',
    '⁴' => '4',
    '⁵' => '5',
    '⁶' => '6',
    '⁷' => '7',
    '⁸' => '8',
    '⁹' => '9',
};

/// How a rule rewrites its input
pub enum RuleKind {
    /// Per-character substitution from a glyph table
    Glyphs(&'static phf::Map<char, &'static str>),
    /// Regex rewrite, each match replaced by the closure's output
    Pattern {
        regex: Regex,
        rewrite: fn(&Captures) -> String,
    },
    /// Whole-string transform
    Text(fn(&str) -> String),
}

/// One named step of the conversion table
pub struct Rule {
    pub name: &'static str,
    pub kind: RuleKind,
}

impl Rule {
    fn glyphs(name: &'static str, table: &'static phf::Map<char, &'static str>) -> Self {
        Self {
            name,
            kind: RuleKind::Glyphs(table),
        }
    }

    fn pattern(name: &'static str, pattern: &str, rewrite: fn(&Captures) -> String) -> Self {
        Self {
            name,
            kind: RuleKind::Pattern {
                regex: Regex::new(pattern).expect("invalid built-in pattern"),
                rewrite,
            },
        }
    }

    fn text(name: &'static str, transform: fn(&str) -> String) -> Self {
        Self {
            name,
            kind: RuleKind::Text(transform),
        }
    }

    pub fn apply(&self, input: &str) -> String {
        match &self.kind {
            RuleKind::Glyphs(table) => replace_glyphs(input, table),
            RuleKind::Pattern { regex, rewrite } => {
                regex.replace_all(input, |caps: &Captures| rewrite(caps)).into_owned()
            }
            RuleKind::Text(transform) => transform(input),
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// A bare `e` is one not glued to a preceding letter or control word
const BARE: &str = r"(^|[^A-Za-z\\])";

lazy_static! {
    /// Substitution table, applied in order
    pub static ref RULES: Vec<Rule> = vec![
        Rule::glyphs("invisible", &INVISIBLE),
        Rule::glyphs("greek", &GREEK),
        Rule::glyphs("operators", &OPERATORS),
        Rule::pattern(
            "superscript-digits",
            r"([\w)\]}])([⁰¹²³⁴⁵⁶⁷⁸⁹]+)",
            rewrite_superscript_digits,
        ),
        Rule::pattern(
            "caret-exponent",
            r"(\w)\^((?:\\[A-Za-z]+|[A-Za-z0-9])+)",
            rewrite_caret_exponent,
        ),
        Rule::pattern("euler-imaginary", &euler_pattern(), rewrite_euler),
        Rule::text("whitespace", normalize_whitespace),
        Rule::pattern("euler-imaginary-spaced", &euler_pattern(), rewrite_euler),
    ];

    /// Exponent notation repair, applied after [`RULES`]
    pub static ref REPAIR_RULES: Vec<Rule> = vec![
        Rule::pattern(
            "bare-ei-exponent",
            &format!(r"{}ei([A-Za-z\\]+)", BARE),
            |caps| format!("{}e^{{i{}}}", &caps[1], &caps[2]),
        ),
        Rule::pattern(
            "bare-e-exponent",
            &format!(r"{}e([A-Za-z\\]+)", BARE),
            rewrite_bare_e,
        ),
    ];
}

fn euler_pattern() -> String {
    format!(r"{}e\s*i\s*\\(pi|theta)(\^(?:[0-9]|\{{[^{{}}]*\}}))?", BARE)
}

/// Convert rendered Unicode math text into approximate LaTeX.
///
/// Text without recognized glyphs or patterns comes back unchanged apart
/// from whitespace normalization.
///
/// # Example
///
/// ```
/// use texgrab::unicode_to_latex;
///
/// assert_eq!(unicode_to_latex("θ²+π"), r"\theta^2+\pi");
/// assert_eq!(unicode_to_latex("eiθ"), r"e^{i\theta}");
/// ```
pub fn unicode_to_latex(text: &str) -> String {
    RULES
        .iter()
        .chain(REPAIR_RULES.iter())
        .fold(text.to_string(), |acc, rule| rule.apply(&acc))
}

/// Look up a rule of either table by name
pub fn rule(name: &str) -> Option<&'static Rule> {
    RULES
        .iter()
        .chain(REPAIR_RULES.iter())
        .find(|r| r.name == name)
}

fn replace_glyphs(input: &str, table: &phf::Map<char, &'static str>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        let Some(replacement) = table.get(&c) else {
            out.push(c);
            continue;
        };
        out.push_str(replacement);
        // `\pi` + `r` must not fuse into `\pir`
        if is_control_word(replacement) && chars.peek().is_some_and(|n| n.is_ascii_alphabetic()) {
            out.push(' ');
        }
    }
    out
}

fn is_control_word(s: &str) -> bool {
    s.starts_with('\\') && s.ends_with(|c: char| c.is_ascii_alphabetic())
}

fn rewrite_superscript_digits(caps: &Captures) -> String {
    let digits: String = caps[2]
        .chars()
        .filter_map(|c| SUPERSCRIPT_DIGITS.get(&c).copied())
        .collect();
    if digits.len() == 1 {
        format!("{}^{}", &caps[1], digits)
    } else {
        format!("{}^{{{}}}", &caps[1], digits)
    }
}

fn rewrite_caret_exponent(caps: &Captures) -> String {
    let exponent = &caps[2];
    if exponent.len() == 1 && exponent.as_bytes()[0].is_ascii_digit() {
        caps[0].to_string()
    } else {
        format!("{}^{{{}}}", &caps[1], exponent)
    }
}

fn rewrite_euler(caps: &Captures) -> String {
    // a trailing power belongs to the angle, not to the whole `e^{...}`
    let power = caps.get(3).map_or("", |m| m.as_str());
    format!("{}e^{{i\\{}{}}}", &caps[1], &caps[2], power)
}

fn rewrite_bare_e(caps: &Captures) -> String {
    let run = &caps[2];
    // `ex`, `ey` and friends are too likely to be ordinary text
    if run.len() > 1 || run.contains('\\') {
        format!("{}e^{{{}}}", &caps[1], run)
    } else {
        caps[0].to_string()
    }
}

fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn apply(name: &str, input: &str) -> String {
        rule(name)
            .unwrap_or_else(|| panic!("no rule named {}", name))
            .apply(input)
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<_> = RULES.iter().chain(REPAIR_RULES.iter()).map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "invisible",
                "greek",
                "operators",
                "superscript-digits",
                "caret-exponent",
                "euler-imaginary",
                "whitespace",
                "euler-imaginary-spaced",
                "bare-ei-exponent",
                "bare-e-exponent",
            ]
        );
    }

    #[test]
    fn test_invisible_characters_removed() {
        assert_eq!(apply("invisible", "f\u{2061}(x\u{2062}y)\u{200B}"), "f(xy)");
    }

    #[test]
    fn test_greek_conventional_names() {
        assert_eq!(apply("greek", "θ"), "\\theta");
        assert_eq!(apply("greek", "ε"), "\\varepsilon");
        assert_eq!(apply("greek", "φ"), "\\varphi");
        assert_eq!(apply("greek", "αβγδλμσω"), "\\alpha\\beta\\gamma\\delta\\lambda\\mu\\sigma\\omega");
    }

    #[test]
    fn test_greek_separated_from_following_letter() {
        assert_eq!(apply("greek", "πr"), "\\pi r");
        assert_eq!(apply("greek", "2π"), "2\\pi");
        assert_eq!(apply("greek", "π2"), "\\pi2");
    }

    #[test]
    fn test_operators() {
        assert_eq!(apply("operators", "∞"), "\\infty");
        assert_eq!(apply("operators", "a±b"), "a\\pm b");
        assert_eq!(apply("operators", "a×b÷c"), "a\\times b\\div c");
        assert_eq!(apply("operators", "x≤y≥z≠w≈v"), "x\\leq y\\geq z\\neq w\\approx v");
        assert_eq!(apply("operators", "∑∫√"), "\\sum\\int\\sqrt");
        assert_eq!(apply("operators", "a−b"), "a-b");
    }

    #[test]
    fn test_superscript_digits() {
        assert_eq!(apply("superscript-digits", "x²"), "x^2");
        assert_eq!(apply("superscript-digits", "y³"), "y^3");
        assert_eq!(apply("superscript-digits", "x¹⁰"), "x^{10}");
        assert_eq!(apply("superscript-digits", "(a+b)²"), "(a+b)^2");
        // nothing to attach to
        assert_eq!(apply("superscript-digits", "²"), "²");
    }

    #[test]
    fn test_caret_exponent() {
        assert_eq!(apply("caret-exponent", "e^x"), "e^{x}");
        assert_eq!(apply("caret-exponent", "a^bc"), "a^{bc}");
        assert_eq!(apply("caret-exponent", "x^10"), "x^{10}");
        assert_eq!(apply("caret-exponent", "e^i\\pi"), "e^{i\\pi}");
        assert_eq!(apply("caret-exponent", "x^2"), "x^2");
        assert_eq!(apply("caret-exponent", "e^{x}"), "e^{x}");
    }

    #[test]
    fn test_euler_compound() {
        assert_eq!(apply("euler-imaginary", "ei\\pi"), "e^{i\\pi}");
        assert_eq!(apply("euler-imaginary", "ei\\theta"), "e^{i\\theta}");
        assert_eq!(apply("euler-imaginary", "e i \\pi+1"), "e^{i\\pi}+1");
        assert_eq!(apply("euler-imaginary", "ei\\pi^2"), "e^{i\\pi^2}");
        assert_eq!(apply("euler-imaginary", "ei\\theta^{10}"), "e^{i\\theta^{10}}");
        // part of a longer word
        assert_eq!(apply("euler-imaginary", "thei\\pi"), "thei\\pi");
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(apply("whitespace", "  a \n\t b  "), "a b");
    }

    #[test]
    fn test_bare_ei_exponent() {
        assert_eq!(apply("bare-ei-exponent", "eix"), "e^{ix}");
        assert_eq!(apply("bare-ei-exponent", "1+ei\\omega"), "1+e^{i\\omega}");
        assert_eq!(apply("bare-ei-exponent", "\\beta"), "\\beta");
    }

    #[test]
    fn test_bare_e_exponent() {
        assert_eq!(apply("bare-e-exponent", "exy"), "e^{xy}");
        assert_eq!(apply("bare-e-exponent", "e\\pi"), "e^{\\pi}");
        assert_eq!(apply("bare-e-exponent", "ex"), "ex");
        assert_eq!(apply("bare-e-exponent", "\\theta"), "\\theta");
        assert_eq!(apply("bare-e-exponent", "\\epsilon"), "\\epsilon");
    }

    #[test]
    fn test_full_conversion() {
        assert_eq!(unicode_to_latex("θ²+π"), "\\theta^2+\\pi");
        assert_eq!(unicode_to_latex("eiθ"), "e^{i\\theta}");
        assert_eq!(unicode_to_latex("e i π + 1 = 0"), "e^{i\\pi} + 1 = 0");
        assert_eq!(unicode_to_latex("eiπ²"), "e^{i\\pi^2}");
        assert_eq!(unicode_to_latex("e i θ¹⁰"), "e^{i\\theta^{10}}");
        assert_eq!(unicode_to_latex("∑ xᵢ ≤ ∞"), "\\sum xᵢ \\leq \\infty");
    }

    #[test]
    fn test_identity_on_plain_text() {
        for text in ["x+y=z", "f(x) = 2x + 1", "abc", "", "x^2"] {
            assert_eq!(unicode_to_latex(text), text);
        }
    }

    #[test]
    fn test_idempotent_on_output() {
        for text in ["θ²+π", "eiθ", "πr²", "e^x + α³", "x¹⁰ ≈ ∞", "e i π", "eiπ²"] {
            let once = unicode_to_latex(text);
            assert_eq!(unicode_to_latex(&once), once, "input {:?}", text);
        }
    }
}
