//! Rendering context - per-document state established by `setup`

use crate::types::PageSize;

use super::defaults;

/// Page margins in millimetres, one per edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Tunable output-compensation factors.
///
/// Both defaults are empirical corrections against the target renderer and
/// carry no formal derivation; they are exposed here so callers can adjust
/// them without a rebuild, not because other values are known to be better.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Multiplier applied to every nominal stroke width on output.
    pub stroke_factor: f64,
    /// Fraction of the text height used to shift glyph baselines down.
    pub baseline_factor: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            stroke_factor: defaults::STROKE_FACTOR,
            baseline_factor: defaults::BASELINE_FACTOR,
        }
    }
}

/// Rendering context
///
/// Owned by a single render pass over one document: created fresh per
/// conversion, populated by the document's `setup` element, read by every
/// drawable after it. Never shared across documents.
pub struct RenderContext {
    /// Physical page size in millimetres
    pub page: PageSize,
    /// Margins from the `setup` element
    pub margins: Margins,
    /// Baseline line width from `setup`. Drawables carry their own nominal
    /// widths, so this is state the format defines rather than state the
    /// renderers currently consume.
    pub pen_width: f64,
    pub options: RenderOptions,
}

impl RenderContext {
    pub fn new(page: PageSize) -> Self {
        Self::with_options(page, RenderOptions::default())
    }

    pub fn with_options(page: PageSize, options: RenderOptions) -> Self {
        RenderContext {
            page,
            margins: Margins::default(),
            pen_width: 0.0,
            options,
        }
    }
}
