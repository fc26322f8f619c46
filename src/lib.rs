//! wks2svg converts KiCad worksheet page-layout templates (`.kicad_wks`)
//! into FreeCAD TechDraw compatible SVG drawing-template overlays.
//!
//! The pipeline is text to tokens to syntax tree to SVG: a pest grammar
//! reads the parenthesized worksheet language, [`parse::parse`] lowers it
//! into a typed tree, and [`render::render`] interprets the supported
//! element kinds against a per-document [`RenderContext`]. Everything is
//! synchronous and pure; converting two documents on two threads is safe
//! because no state is shared between conversions.

use pest_derive::Parser;

pub mod ast;
pub mod errors;
pub mod log;
pub mod pages;
pub mod parse;
pub mod render;
pub mod types;

pub use ast::{ListExpr, Node};
pub use errors::{ParseError, RenderError};
pub use render::{Margins, RenderContext, RenderOptions, render};
pub use types::{Corner, PageSize, editable_field};

#[derive(Parser)]
#[grammar = "wks.pest"]
pub struct WksParser;

/// Convert worksheet source text to a TechDraw SVG document.
///
/// `page` is the physical page size the template targets; callers resolve
/// it up front, typically via [`pages::page_size`] from the template's
/// filename. Returns the SVG string on success, or an error with
/// diagnostics.
pub fn wks_to_svg(source: &str, page: PageSize) -> Result<String, miette::Report> {
    wks_to_svg_named("<input>", source, page, RenderOptions::default())
}

/// Like [`wks_to_svg`], with a source name for diagnostics and explicit
/// [`RenderOptions`].
pub fn wks_to_svg_named(
    name: &str,
    source: &str,
    page: PageSize,
    options: RenderOptions,
) -> Result<String, miette::Report> {
    let document = parse::parse(name, source)?;
    let mut ctx = RenderContext::with_options(page, options);
    render::render(&mut ctx, &document).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn parse_simple_list() {
        let input = "(setup 1 2 3)";
        let result = WksParser::parse(Rule::document, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_nested_lists() {
        let input = "(line (name L1) (start 110 5) (end 2 5) (linewidth 0.15))";
        let result = WksParser::parse(Rule::document, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_multiline_document() {
        let input = r#"
            (page_layout
                (setup (textsize 1.5 1.5) (linewidth 0.15))
                (line (name 1) (start 110 5) (end 2 5))
            )
        "#;
        let result = WksParser::parse(Rule::document, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_rejects_unbalanced_parens() {
        let result = WksParser::parse(Rule::document, "(page_layout (setup 1)");
        assert!(result.is_err());
    }

    #[test]
    fn parse_rejects_trailing_content() {
        let result = WksParser::parse(Rule::document, "(a b) extra");
        assert!(result.is_err());
    }

    #[test]
    fn parse_atom_rule() {
        let result = WksParser::parse(Rule::atom, "segm1:Line");
        assert!(result.is_ok(), "Failed to parse atom: {:?}", result.err());
    }

    #[test]
    fn parse_quoted_words_as_plain_atoms() {
        // quotes are not delimiters; each word is its own atom
        let result = WksParser::parse(Rule::document, r#"(tbtext "A quoted sentence")"#);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn token_stream_accepts_anything() {
        for input in ["", "   ", "((((", "a)b(c", r#""unclosed"#] {
            let result = WksParser::parse(Rule::token_stream, input);
            assert!(result.is_ok(), "token_stream rejected {input:?}");
        }
    }

    #[test]
    fn convert_minimal_document() {
        let input = "(page_layout (setup x 0 y 0.15 5 5 5 5) \
                     (line L1 (pos 0 0 ltcorner) (pos 10 0 ltcorner) 0.15))";
        let svg = wks_to_svg(input, PageSize::new(210.0, 297.0)).unwrap();
        assert!(svg.contains("width=\"210mm\""));
        assert!(svg.contains("stroke-width: 0.1125pt"));
    }

    #[test]
    fn convert_surfaces_parse_errors() {
        let result = wks_to_svg("(page_layout", PageSize::new(210.0, 297.0));
        assert!(result.is_err());
    }
}
