//! Corner-relative coordinate resolution.
//!
//! Worksheet coordinates are offsets from one of the four physical page
//! corners. Resolution folds the current margins and page size in, so the
//! same offset lands in the right place on any page the template targets.

use glam::{DVec2, dvec2};

use crate::ast::{ListExpr, Node};
use crate::errors::RenderError;
use crate::types::Corner;

use super::context::RenderContext;

/// Resolve a `(pos x y [corner])` style element to an absolute point in the
/// output coordinate space. The element's operator is irrelevant; `pos`,
/// `start`, and `end` all share this layout. A missing corner tag means
/// `rbcorner`.
pub fn resolve(ctx: &RenderContext, expr: &ListExpr) -> Result<DVec2, RenderError> {
    let x = number_at(expr, 0)?;
    let y = number_at(expr, 1)?;
    let corner = match expr.operand(2) {
        None => Corner::default(),
        Some(Node::Str(tag)) => tag
            .parse::<Corner>()
            .map_err(|e| RenderError::UnknownCorner { tag: e.0 })?,
        Some(other) => {
            return Err(RenderError::UnknownCorner {
                tag: other.to_string(),
            });
        }
    };

    let page = ctx.page;
    let m = ctx.margins;
    Ok(match corner {
        Corner::TopLeft => dvec2(x + m.left, y + m.top),
        Corner::BottomLeft => dvec2(x + m.left, page.height - y - m.bottom),
        Corner::TopRight => dvec2(page.width - x - m.right, y + m.top),
        Corner::BottomRight => dvec2(page.width - x - m.right, page.height - y - m.bottom),
    })
}

fn number_at(expr: &ListExpr, index: usize) -> Result<f64, RenderError> {
    expr.operand(index)
        .and_then(Node::as_f64)
        .ok_or_else(|| {
            RenderError::malformed(
                "pos",
                format!("coordinate operand {} of `{}` is missing or not numeric", index + 1, expr.operator),
            )
        })
}
