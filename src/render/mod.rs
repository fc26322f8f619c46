//! SVG rendering for worksheet documents
//!
//! This module is organized into submodules:
//! - `context`: RenderContext carried across the elements of one document
//! - `coords`: corner-relative coordinate resolution
//! - `defaults`: compensation factors and fallback values
//! - `svg`: SVG generation

pub mod context;
pub mod coords;
pub mod defaults;
pub mod svg;

pub use context::{Margins, RenderContext, RenderOptions};

use glam::{DVec2, dvec2};

use crate::ast::{ListExpr, Node};
use crate::errors::RenderError;
use crate::log::debug;
use crate::types::editable_field;
use svg::{Anchor, SvgWriter};

/// The worksheet element kinds this renderer interprets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    PageLayout,
    Setup,
    Line,
    Rect,
    Text,
    Polygon,
    /// Anything else is skipped, not an error
    Unsupported,
}

impl NodeKind {
    fn of(operator: &str) -> NodeKind {
        match operator {
            "page_layout" => NodeKind::PageLayout,
            "setup" => NodeKind::Setup,
            "line" => NodeKind::Line,
            "rect" => NodeKind::Rect,
            "tbtext" => NodeKind::Text,
            "polygon" => NodeKind::Polygon,
            _ => NodeKind::Unsupported,
        }
    }

    /// Kinds that read margins and page size out of the context.
    fn is_drawable(self) -> bool {
        matches!(
            self,
            NodeKind::Line | NodeKind::Rect | NodeKind::Text | NodeKind::Polygon
        )
    }
}

/// Render a parsed worksheet document to SVG.
///
/// The root must be a `page_layout` list, and a `setup` element must come
/// ahead of every drawable; both are checked before a byte of output is
/// produced. Children render in document order, `setup` updating the
/// context and everything else appending markup.
pub fn render(ctx: &mut RenderContext, document: &Node) -> Result<String, RenderError> {
    let Node::List(root) = document else {
        return Err(RenderError::NotPageLayout {
            found: document.to_string(),
        });
    };
    if NodeKind::of(&root.operator) != NodeKind::PageLayout {
        return Err(RenderError::NotPageLayout {
            found: root.operator.clone(),
        });
    }

    // fail fast on ordering: margins are undefined until setup has run
    let mut setup_seen = false;
    for child in root.sublists() {
        let kind = NodeKind::of(&child.operator);
        if kind == NodeKind::Setup {
            setup_seen = true;
        } else if kind.is_drawable() && !setup_seen {
            return Err(RenderError::MissingSetup {
                element: child.operator.clone(),
            });
        }
    }

    let mut out = SvgWriter::new();
    out.open_document(ctx.page)?;
    for child in &root.operands {
        match child {
            Node::List(expr) => render_element(ctx, &mut out, expr)?,
            other => debug!("ignoring stray atom `{}` under page_layout", other),
        }
    }
    out.finish()
}

fn render_element(
    ctx: &mut RenderContext,
    out: &mut SvgWriter,
    expr: &ListExpr,
) -> Result<(), RenderError> {
    match NodeKind::of(&expr.operator) {
        NodeKind::Setup => {
            apply_setup(ctx, expr);
            Ok(())
        }
        NodeKind::Line => render_line(ctx, out, expr),
        NodeKind::Rect => render_rect(ctx, out, expr),
        NodeKind::Text => render_text(ctx, out, expr),
        NodeKind::Polygon => render_polygon(ctx, out, expr),
        NodeKind::PageLayout => {
            debug!("ignoring nested page_layout element");
            Ok(())
        }
        NodeKind::Unsupported => {
            debug!("skipping unsupported element `{}`", expr.operator);
            Ok(())
        }
    }
}

/// Populate the context from a `setup` element. Counting operands 1-based
/// after the operator, the 3rd is the baseline line width and the
/// 5th/6th/7th/8th are the left/right/top/bottom margins. Each slot is a
/// bare number or a `(name value)` pair; slots that are absent or
/// non-numeric leave the current value untouched. Produces no markup.
fn apply_setup(ctx: &mut RenderContext, expr: &ListExpr) {
    if let Some(v) = setup_value(expr, 2) {
        ctx.pen_width = v;
    }
    if let Some(v) = setup_value(expr, 4) {
        ctx.margins.left = v;
    }
    if let Some(v) = setup_value(expr, 5) {
        ctx.margins.right = v;
    }
    if let Some(v) = setup_value(expr, 6) {
        ctx.margins.top = v;
    }
    if let Some(v) = setup_value(expr, 7) {
        ctx.margins.bottom = v;
    }
}

fn setup_value(expr: &ListExpr, index: usize) -> Option<f64> {
    match expr.operand(index)? {
        Node::List(pair) => pair.operands.first().and_then(Node::as_f64),
        atom => atom.as_f64(),
    }
}

fn render_line(
    ctx: &RenderContext,
    out: &mut SvgWriter,
    expr: &ListExpr,
) -> Result<(), RenderError> {
    let id = ident_at(expr, 0, "line")?;
    let a = coords::resolve(ctx, coord_at(expr, 1, "line")?)?;
    let b = coords::resolve(ctx, coord_at(expr, 2, "line")?)?;
    let width = width_at(expr, 3, "line")?;
    out.line(&id, a, b, ctx.options.stroke_factor * width)
}

fn render_rect(
    ctx: &RenderContext,
    out: &mut SvgWriter,
    expr: &ListExpr,
) -> Result<(), RenderError> {
    let id = ident_at(expr, 0, "rect")?;
    let a = coords::resolve(ctx, coord_at(expr, 1, "rect")?)?;
    let b = coords::resolve(ctx, coord_at(expr, 2, "rect")?)?;
    let width = width_at(expr, 3, "rect")?;
    // corners may arrive in either diagonal order
    let origin = a.min(b);
    let size = (a - b).abs();
    out.rect(&id, origin, size, ctx.options.stroke_factor * width)
}

fn render_text(
    ctx: &RenderContext,
    out: &mut SvgWriter,
    expr: &ListExpr,
) -> Result<(), RenderError> {
    // Leading scalar operands are the text itself, one word per token
    // (quoted sentences were split by the tokenizer). Quote characters
    // survive decoding, so strip them here.
    let words: Vec<String> = expr
        .operands
        .iter()
        .take_while(|op| op.is_atom())
        .filter_map(Node::atom_text)
        .collect();
    let text = words.join(" ");
    let text = text.trim_matches('"');

    let mut pos = DVec2::ZERO;
    let mut anchor = Anchor::Start;
    let mut height = defaults::TEXT_HEIGHT;
    let mut id = defaults::TEXT_ID.to_string();
    for prop in expr.operands.iter().skip(words.len()).filter_map(Node::as_list) {
        match prop.operator.as_str() {
            "pos" => pos = coords::resolve(ctx, prop)?,
            "justify" => {
                anchor = match prop.operand(0).and_then(Node::as_str) {
                    Some("left") | None => Anchor::Start,
                    Some(_) => Anchor::Middle,
                };
            }
            "font" => {
                if let Some(h) = font_height(prop) {
                    height = h;
                }
            }
            "name" => {
                if let Some(name) = prop.operand(0).and_then(Node::atom_text) {
                    id = name;
                }
            }
            other => debug!("ignoring tbtext property `{}`", other),
        }
    }

    let dy = ctx.options.baseline_factor * height;
    if text.starts_with('%') {
        let field = editable_field(text).ok_or_else(|| RenderError::UnmappedPlaceholder {
            code: text.to_string(),
        })?;
        out.editable_text(field, &id, pos, height, anchor, dy)
    } else {
        out.static_text(&id, pos, height, anchor, dy, text)
    }
}

/// Text height lives at a fixed position inside the font clause: the
/// clause's 2nd operand is a `(size w h)` pair and the height is that
/// pair's 2nd value.
fn font_height(font: &ListExpr) -> Option<f64> {
    font.operand(1)?.as_list()?.operand(1)?.as_f64()
}

fn render_polygon(
    ctx: &RenderContext,
    out: &mut SvgWriter,
    expr: &ListExpr,
) -> Result<(), RenderError> {
    let mut id = defaults::POLYGON_ID.to_string();
    let mut rotation = 0.0;
    let mut origin = DVec2::ZERO;
    let mut width = defaults::POLYGON_STROKE;
    let mut points: Vec<DVec2> = Vec::new();

    for prop in expr.sublists() {
        match prop.operator.as_str() {
            "name" => {
                if let Some(name) = prop.operand(0).and_then(Node::atom_text) {
                    id = name;
                }
            }
            // the source format rotates the other way around
            "rotate" => {
                if let Some(angle) = prop.operand(0).and_then(Node::as_f64) {
                    rotation = 360.0 - angle;
                }
            }
            "pos" => origin = coords::resolve(ctx, prop)?,
            "linewidth" => {
                if let Some(w) = prop.operand(0).and_then(Node::as_f64) {
                    width = w;
                }
            }
            // vertices are already in the translated local frame; no
            // corner resolution applies
            "pts" => {
                for pt in prop.sublists() {
                    let (Some(x), Some(y)) = (
                        pt.operand(0).and_then(Node::as_f64),
                        pt.operand(1).and_then(Node::as_f64),
                    ) else {
                        return Err(RenderError::malformed(
                            "polygon",
                            format!("point `{}` lacks two numeric values", pt.operator),
                        ));
                    };
                    points.push(dvec2(x, y));
                }
            }
            other => debug!("ignoring polygon property `{}`", other),
        }
    }

    out.polygon(&id, origin, rotation, &points, ctx.options.stroke_factor * width)
}

/// Identifier operand: either a bare word or a `(name ident)` clause.
fn ident_at(expr: &ListExpr, index: usize, element: &'static str) -> Result<String, RenderError> {
    let node = expr
        .operand(index)
        .ok_or_else(|| RenderError::malformed(element, "missing identifier operand"))?;
    match node {
        Node::List(pair) => pair.operands.first().and_then(Node::atom_text),
        atom => atom.atom_text(),
    }
    .ok_or_else(|| RenderError::malformed(element, "identifier operand carries no value"))
}

fn coord_at<'a>(
    expr: &'a ListExpr,
    index: usize,
    element: &'static str,
) -> Result<&'a ListExpr, RenderError> {
    expr.operand(index).and_then(Node::as_list).ok_or_else(|| {
        RenderError::malformed(element, format!("operand {} is not a coordinate", index + 1))
    })
}

/// Stroke-width operand: a bare number or a `(linewidth value)` clause.
fn width_at(expr: &ListExpr, index: usize, element: &'static str) -> Result<f64, RenderError> {
    let node = expr
        .operand(index)
        .ok_or_else(|| RenderError::malformed(element, "missing line-width operand"))?;
    match node {
        Node::List(pair) => pair.operands.first().and_then(Node::as_f64),
        atom => atom.as_f64(),
    }
    .ok_or_else(|| RenderError::malformed(element, "line-width operand is not numeric"))
}
