//! Error types with rich diagnostics using miette
//!
//! Parse errors carry source spans; render errors are structural and name
//! the offending element instead.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// Parse Errors
// ============================================================================

/// Errors that occur while parsing worksheet text
#[derive(Error, Diagnostic, Debug)]
pub enum ParseError {
    /// Unbalanced parentheses, premature end of input, or trailing content
    /// after the top-level expression. The `expected` text comes from the
    /// grammar and names what would have been legal at the error position.
    #[error("malformed worksheet expression")]
    #[diagnostic(code(wks2svg::parse::syntax))]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("{expected}")]
        span: SourceSpan,
        expected: String,
    },
}

impl ParseError {
    /// Wrap a pest error, carrying its position into a miette span.
    pub(crate) fn from_pest(
        name: &str,
        source: &str,
        err: pest::error::Error<crate::Rule>,
    ) -> Self {
        use pest::error::InputLocation;
        let (offset, len) = match err.location {
            InputLocation::Pos(p) => (p.min(source.len()), 0),
            InputLocation::Span((start, end)) => (start.min(source.len()), end.saturating_sub(start)),
        };
        ParseError::Syntax {
            src: NamedSource::new(name, source.to_string()),
            span: (offset, len).into(),
            expected: err.variant.message().into_owned(),
        }
    }
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur while rendering a parsed document to SVG
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("document root must be a page_layout element, found `{found}`")]
    #[diagnostic(code(wks2svg::render::not_page_layout))]
    NotPageLayout { found: String },

    #[error("`{element}` appears before any setup element")]
    #[diagnostic(
        code(wks2svg::render::missing_setup),
        help("a setup element must establish the page margins ahead of all drawables")
    )]
    MissingSetup { element: String },

    #[error("no editable field is mapped for placeholder `{code}`")]
    #[diagnostic(code(wks2svg::render::unmapped_placeholder))]
    UnmappedPlaceholder { code: String },

    #[error("unknown corner reference `{tag}`")]
    #[diagnostic(
        code(wks2svg::render::unknown_corner),
        help("expected one of ltcorner, lbcorner, rtcorner, rbcorner")
    )]
    UnknownCorner { tag: String },

    #[error("malformed `{element}` element: {reason}")]
    #[diagnostic(code(wks2svg::render::malformed_element))]
    Malformed {
        element: &'static str,
        reason: String,
    },

    #[error("failed to serialize SVG output")]
    #[diagnostic(code(wks2svg::render::io))]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Shorthand for a malformed-element error.
    pub(crate) fn malformed(element: &'static str, reason: impl Into<String>) -> Self {
        RenderError::Malformed {
            element,
            reason: reason.into(),
        }
    }
}
