//! Integration tests for LaTeX extraction

use pretty_assertions::assert_eq;
use texgrab::{
    extract, extract_all_from_html, extract_detailed, extract_with_options, locate, GrabOptions,
    HtmlDocument, HtmlNode, Strategy,
};

fn first<'a>(doc: &'a HtmlDocument, selector: &str) -> HtmlNode<'a> {
    doc.select_first(selector)
        .unwrap()
        .unwrap_or_else(|| panic!("nothing matches {}", selector))
}

fn extract_id(html: &str, id: &str) -> (String, Strategy) {
    let doc = HtmlDocument::parse(html);
    let found = extract_detailed(&first(&doc, &format!("#{}", id)), &GrabOptions::default());
    (found.latex, found.strategy)
}

// ============================================================================
// Authoritative sources
// ============================================================================

mod sources {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mathjax_script() {
        let (latex, strategy) = extract_id(
            r#"<span class="MathJax" id="f"><span>x²+y²=r²</span><script type="math/tex">  x^2+y^2=r^2 </script></span>"#,
            "f",
        );
        assert_eq!(latex, "x^2+y^2=r^2");
        assert_eq!(strategy, Strategy::ScriptTag);
    }

    #[test]
    fn test_mathjax_display_script_type() {
        let (latex, strategy) = extract_id(
            r#"<div class="MathJax_Display" id="f"><script type="math/tex; mode=display">\sum_i a_i</script></div>"#,
            "f",
        );
        assert_eq!(latex, r"\sum_i a_i");
        assert_eq!(strategy, Strategy::ScriptTag);
    }

    #[test]
    fn test_katex_annotation() {
        let (latex, strategy) = extract_id(
            r#"<span class="katex" id="f"><span class="katex-mathml"><math><semantics><mrow><mfrac><mn>1</mn><mn>2</mn></mfrac></mrow><annotation encoding="application/x-tex">\frac{1}{2}</annotation></semantics></math></span><span class="katex-html" aria-hidden="true">12</span></span>"#,
            "f",
        );
        assert_eq!(latex, r"\frac{1}{2}");
        assert_eq!(strategy, Strategy::Annotation);
    }

    #[test]
    fn test_annotation_encoding_must_match_exactly() {
        let (latex, strategy) = extract_id(
            r#"<span class="katex" id="f"><math><semantics><mi>x</mi><annotation encoding="text/plain">x</annotation></semantics></math></span>"#,
            "f",
        );
        assert_eq!(strategy, Strategy::RenderedText);
        assert_eq!(latex, "xx");
    }

    #[test]
    fn test_script_wins_over_annotation() {
        let (latex, _) = extract_id(
            r#"<span class="katex" id="f"><math><semantics><annotation encoding="application/x-tex">b</annotation></semantics></math><script type="math/tex">a</script></span>"#,
            "f",
        );
        assert_eq!(latex, "a");
    }

    #[test]
    fn test_data_latex_attribute() {
        let (latex, strategy) = extract_id(r#"<span data-latex=" \alpha+1 " id="f">α+1</span>"#, "f");
        assert_eq!(latex, r"\alpha+1");
        assert_eq!(strategy, Strategy::Attribute);
    }

    #[test]
    fn test_attribute_priority() {
        let (latex, _) = extract_id(
            r#"<span title="\beta" data-tex="\gamma" data-latex="\delta" id="f">x</span>"#,
            "f",
        );
        assert_eq!(latex, r"\delta");

        let (latex, _) = extract_id(r#"<span class="math-x" title="\beta" data-tex="\gamma" id="f">x</span>"#, "f");
        assert_eq!(latex, r"\gamma");
    }

    #[test]
    fn test_attribute_without_backslash_skipped() {
        let (latex, strategy) = extract_id(
            r#"<span data-latex="x+1" title="\omega" id="f">ω</span>"#,
            "f",
        );
        assert_eq!(latex, r"\omega");
        assert_eq!(strategy, Strategy::Attribute);
    }

    #[test]
    fn test_configured_attribute_list() {
        let doc = HtmlDocument::parse(r#"<span class="math-x" data-source="\zeta" title="\eta" id="f">ζ</span>"#);
        let options = GrabOptions {
            latex_attributes: vec!["data-source".to_string()],
            ..GrabOptions::default()
        };
        assert_eq!(extract_with_options(&first(&doc, "#f"), &options), r"\zeta");
    }

    #[test]
    fn test_aria_label() {
        let (latex, strategy) = extract_id(
            r#"<span class="math-inline" aria-label=" \sqrt{2} " id="f">√2</span>"#,
            "f",
        );
        assert_eq!(latex, r"\sqrt{2}");
        assert_eq!(strategy, Strategy::AriaLabel);
    }

    #[test]
    fn test_aria_label_without_backslash_skipped() {
        let (_, strategy) = extract_id(
            r#"<span class="math-inline" aria-label="square root of two" id="f">√2</span>"#,
            "f",
        );
        assert_eq!(strategy, Strategy::UnicodeHeuristic);
    }

    #[test]
    fn test_generic_math_script() {
        let (latex, strategy) = extract_id(
            r#"<span class="math-container" id="f"><script type="math/asciimath">sum_(i=1)^n i</script></span>"#,
            "f",
        );
        assert_eq!(latex, "sum_(i=1)^n i");
        assert_eq!(strategy, Strategy::MathScript);
    }

    #[test]
    fn test_untyped_script_ignored() {
        let (latex, strategy) = extract_id(
            r#"<span class="math-container" id="f"><script>var x = 1;</script>$a$</span>"#,
            "f",
        );
        // the script body is part of the rendered text, so no `$...$` wrapping
        assert_eq!(strategy, Strategy::RenderedText);
        assert_eq!(latex, "var x = 1;$a$");
    }
}

// ============================================================================
// Rendered text
// ============================================================================

mod rendered_text {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_double_dollar() {
        let (latex, strategy) = extract_id(r#"<div class="math-block" id="f">  $$E=mc^2$$ </div>"#, "f");
        assert_eq!(latex, "E=mc^2");
        assert_eq!(strategy, Strategy::DelimitedText);
    }

    #[test]
    fn test_single_dollar() {
        let (latex, _) = extract_id(r#"<span class="math-inline" id="f">$a^2$</span>"#, "f");
        assert_eq!(latex, "a^2");
    }

    #[test]
    fn test_unicode_heuristic() {
        let (latex, strategy) = extract_id(r#"<span class="katex" id="f">θ²+π</span>"#, "f");
        assert_eq!(latex, r"\theta^2+\pi");
        assert_eq!(strategy, Strategy::UnicodeHeuristic);
    }

    #[test]
    fn test_euler_heuristic() {
        let (latex, _) = extract_id(r#"<span class="katex" id="f">eiθ</span>"#, "f");
        assert_eq!(latex, r"e^{i\theta}");
    }

    #[test]
    fn test_heuristic_across_glyph_spans() {
        let (latex, _) = extract_id(
            r#"<span class="katex" id="f"><span class="mord">e</span><span class="msupsub"><span class="mord">i</span><span class="mord">π</span></span></span>"#,
            "f",
        );
        assert_eq!(latex, r"e^{i\pi}");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let (latex, strategy) = extract_id(r#"<span class="katex" id="f"> x+y </span>"#, "f");
        assert_eq!(latex, "x+y");
        assert_eq!(strategy, Strategy::RenderedText);
    }

    #[test]
    fn test_strict_mode_keeps_rendered_text() {
        let doc = HtmlDocument::parse(r#"<span class="katex" id="f">θ²+π</span>"#);
        let found = extract_detailed(&first(&doc, "#f"), &GrabOptions::strict());
        assert_eq!(found.latex, "θ²+π");
        assert_eq!(found.strategy, Strategy::RenderedText);
        assert!(!found.is_exact());
    }

    #[test]
    fn test_empty_element() {
        let (latex, strategy) = extract_id(r#"<span class="katex" id="f"></span>"#, "f");
        assert_eq!(latex, "");
        assert_eq!(strategy, Strategy::RenderedText);
    }
}

// ============================================================================
// End to end
// ============================================================================

mod end_to_end {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_locate_then_extract_from_glyph() {
        let doc = HtmlDocument::parse(
            r#"<span class="katex"><span class="katex-mathml"><math><semantics><mi>x</mi><annotation encoding="application/x-tex">x^{2}</annotation></semantics></math></span><span class="katex-html"><span class="mord" id="g">x</span></span></span>"#,
        );
        let formula = locate(&first(&doc, "#g")).unwrap();
        assert_eq!(extract(&formula), "x^{2}");
    }

    #[test]
    fn test_extract_is_idempotent() {
        let doc = HtmlDocument::parse(r#"<span class="katex" id="f">πr²</span>"#);
        let node = first(&doc, "#f");
        let once = extract(&node);
        assert_eq!(once, r"\pi r^2");
        assert_eq!(extract(&node), once);
        assert_eq!(texgrab::unicode_to_latex(&once), once);
    }

    #[test]
    fn test_extract_all_from_html() {
        let found = extract_all_from_html(
            r#"<p>
                <span class="MathJax"><script type="math/tex">a</script></span>
                <span class="katex">β</span>
                <span data-tex="c">$c$</span>
            </p>"#,
            &GrabOptions::default(),
        );
        let latex: Vec<_> = found.iter().map(|e| e.latex.as_str()).collect();
        assert_eq!(latex, vec!["a", r"\beta", "c"]);
        assert!(found[0].is_exact());
        assert!(!found[1].is_exact());
        assert!(found[2].is_exact());
    }
}
