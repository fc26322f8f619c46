//! SVG generation
//!
//! A thin layer over quick-xml's event writer that knows the handful of
//! element shapes the worksheet renderers emit. Going through the event
//! writer (rather than string concatenation) gets text and attribute
//! escaping for free, so worksheet text containing `<` or `&` still yields
//! a well-formed document.

use glam::DVec2;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::errors::RenderError;
use crate::types::PageSize;

use super::defaults;

/// Horizontal text anchoring in the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// `justify left` in the source format
    Start,
    /// every other justification
    Middle,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
        }
    }
}

/// Format a coordinate or width for output: at most four decimal places,
/// trailing zeros trimmed. Keeps values like `0.75 * 0.15` printing as the
/// exact `0.1125` the target tooling expects instead of a 17-digit float.
pub(crate) fn num(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-0" { "0".to_string() } else { s.to_string() }
}

fn stroke_style(width: f64) -> String {
    format!(
        "stroke: black; stroke-width: {}pt; stroke-linecap: round; stroke-linejoin: round;",
        num(width)
    )
}

fn text_style(height: f64, anchor: Anchor) -> String {
    format!(
        "font-size: {}pt; text-anchor: {}; fill: black; font-family: {}",
        num(height),
        anchor.as_str(),
        defaults::FONT_FAMILY
    )
}

/// Writer for one SVG document: open with [`SvgWriter::open_document`],
/// append elements, then [`SvgWriter::finish`].
pub struct SvgWriter {
    writer: Writer<Vec<u8>>,
}

impl SvgWriter {
    pub fn new() -> Self {
        SvgWriter {
            writer: Writer::new(Vec::new()),
        }
    }

    fn newline(&mut self) -> Result<(), RenderError> {
        self.writer.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(())
    }

    /// XML declaration, provenance comments, and the `<svg>` open tag sized
    /// to the page's physical dimensions with a matching mm viewbox.
    pub fn open_document(&mut self, page: PageSize) -> Result<(), RenderError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))?;
        self.newline()?;
        self.writer.write_event(Event::Comment(BytesText::new(
            " Generated with wks2svg ",
        )))?;
        self.newline()?;
        self.writer.write_event(Event::Comment(BytesText::new(
            " Based on templates created by the KiCad developers: https://gitlab.com/kicad/libraries/kicad-templates ",
        )))?;
        self.newline()?;

        let mut svg = BytesStart::new("svg");
        svg.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
        svg.push_attribute(("version", "1.1"));
        svg.push_attribute((
            "xmlns:freecad",
            "http://www.freecadweb.org/wiki/index.php?title=Svg_Namespace",
        ));
        svg.push_attribute(("width", format!("{}mm", num(page.width)).as_str()));
        svg.push_attribute(("height", format!("{}mm", num(page.height)).as_str()));
        svg.push_attribute((
            "viewBox",
            format!("0 0 {} {}", num(page.width), num(page.height)).as_str(),
        ));
        self.writer.write_event(Event::Start(svg))?;
        self.newline()?;
        Ok(())
    }

    /// Close the `<svg>` element and hand back the document text.
    pub fn finish(mut self) -> Result<String, RenderError> {
        self.writer.write_event(Event::End(BytesEnd::new("svg")))?;
        self.newline()?;
        String::from_utf8(self.writer.into_inner()).map_err(|e| {
            RenderError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })
    }

    pub fn line(&mut self, id: &str, a: DVec2, b: DVec2, width: f64) -> Result<(), RenderError> {
        let mut elem = BytesStart::new("line");
        elem.push_attribute(("id", id));
        elem.push_attribute(("x1", num(a.x).as_str()));
        elem.push_attribute(("y1", num(a.y).as_str()));
        elem.push_attribute(("x2", num(b.x).as_str()));
        elem.push_attribute(("y2", num(b.y).as_str()));
        elem.push_attribute(("style", stroke_style(width).as_str()));
        self.writer.write_event(Event::Empty(elem))?;
        self.newline()
    }

    pub fn rect(
        &mut self,
        id: &str,
        origin: DVec2,
        size: DVec2,
        width: f64,
    ) -> Result<(), RenderError> {
        let mut elem = BytesStart::new("rect");
        elem.push_attribute(("x", num(origin.x).as_str()));
        elem.push_attribute(("y", num(origin.y).as_str()));
        elem.push_attribute(("width", num(size.x).as_str()));
        elem.push_attribute(("height", num(size.y).as_str()));
        elem.push_attribute(("id", id));
        elem.push_attribute((
            "style",
            format!("{} fill: none;", stroke_style(width)).as_str(),
        ));
        self.writer.write_event(Event::Empty(elem))?;
        self.newline()
    }

    fn push_text_attrs(
        elem: &mut BytesStart<'_>,
        id: &str,
        pos: DVec2,
        height: f64,
        anchor: Anchor,
        dy: f64,
    ) {
        elem.push_attribute(("x", num(pos.x).as_str()));
        elem.push_attribute(("y", num(pos.y).as_str()));
        elem.push_attribute((
            "transform",
            format!("translate(0,{})", num(dy)).as_str(),
        ));
        elem.push_attribute(("id", id));
        elem.push_attribute(("style", text_style(height, anchor).as_str()));
    }

    /// Static, visible text.
    pub fn static_text(
        &mut self,
        id: &str,
        pos: DVec2,
        height: f64,
        anchor: Anchor,
        dy: f64,
        content: &str,
    ) -> Result<(), RenderError> {
        let mut elem = BytesStart::new("text");
        Self::push_text_attrs(&mut elem, id, pos, height, anchor, dy);
        self.writer.write_event(Event::Start(elem))?;
        self.writer.write_event(Event::Text(BytesText::new(content)))?;
        self.writer.write_event(Event::End(BytesEnd::new("text")))?;
        self.newline()
    }

    /// An editable placeholder: blank on the page, tagged with the logical
    /// field name so the consuming tool can bind a user-fillable value.
    pub fn editable_text(
        &mut self,
        field: &str,
        id: &str,
        pos: DVec2,
        height: f64,
        anchor: Anchor,
        dy: f64,
    ) -> Result<(), RenderError> {
        let mut elem = BytesStart::new("text");
        elem.push_attribute(("freecad:editable", field));
        Self::push_text_attrs(&mut elem, id, pos, height, anchor, dy);
        self.writer.write_event(Event::Start(elem))?;
        self.writer.write_event(Event::Start(BytesStart::new("tspan")))?;
        self.writer.write_event(Event::Text(BytesText::new("x")))?;
        self.writer.write_event(Event::End(BytesEnd::new("tspan")))?;
        self.writer.write_event(Event::End(BytesEnd::new("text")))?;
        self.newline()
    }

    /// Filled polygon wrapped in a translating group, with the rotation on
    /// the polygon itself so it spins about the translated origin.
    pub fn polygon(
        &mut self,
        id: &str,
        origin: DVec2,
        rotation: f64,
        points: &[DVec2],
        width: f64,
    ) -> Result<(), RenderError> {
        let mut group = BytesStart::new("g");
        group.push_attribute((
            "transform",
            format!("translate({},{})", num(origin.x), num(origin.y)).as_str(),
        ));
        self.writer.write_event(Event::Start(group))?;

        let point_list = points
            .iter()
            .map(|p| format!("{},{}", num(p.x), num(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        let mut elem = BytesStart::new("polygon");
        elem.push_attribute(("id", id));
        elem.push_attribute(("transform", format!("rotate({})", num(rotation)).as_str()));
        elem.push_attribute(("points", point_list.as_str()));
        elem.push_attribute((
            "style",
            format!("fill: black; {}", stroke_style(width)).as_str(),
        ));
        self.writer.write_event(Event::Empty(elem))?;

        self.writer.write_event(Event::End(BytesEnd::new("g")))?;
        self.newline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn numbers_are_trimmed_not_truncated() {
        assert_eq!(num(5.0), "5");
        assert_eq!(num(0.75 * 0.15), "0.1125");
        assert_eq!(num(282.0), "282");
        assert_eq!(num(-7.5), "-7.5");
        assert_eq!(num(0.0), "0");
        assert_eq!(num(-0.0), "0");
        assert_eq!(num(1.0995574205), "1.0996");
    }

    #[test]
    fn document_wrapper_declares_page_size() {
        let mut w = SvgWriter::new();
        w.open_document(PageSize::new(210.0, 297.0)).unwrap();
        let out = w.finish().unwrap();
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>"));
        assert!(out.contains("width=\"210mm\""));
        assert!(out.contains("height=\"297mm\""));
        assert!(out.contains("viewBox=\"0 0 210 297\""));
        assert!(out.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn text_content_is_escaped() {
        let mut w = SvgWriter::new();
        w.open_document(PageSize::new(210.0, 297.0)).unwrap();
        w.static_text("T1", dvec2(0.0, 0.0), 2.0, Anchor::Start, 0.7, "R<1k & C>2n")
            .unwrap();
        let out = w.finish().unwrap();
        assert!(out.contains("R&lt;1k &amp; C&gt;2n"));
    }

    #[test]
    fn editable_text_leads_with_the_field_binding() {
        let mut w = SvgWriter::new();
        w.open_document(PageSize::new(210.0, 297.0)).unwrap();
        w.editable_text("Title", "T2", dvec2(1.0, 2.0), 2.5, Anchor::Middle, 0.875)
            .unwrap();
        let out = w.finish().unwrap();
        assert!(out.contains("<text freecad:editable=\"Title\""));
        assert!(out.contains("<tspan>x</tspan>"));
        assert!(out.contains("text-anchor: middle"));
    }

    #[test]
    fn polygon_groups_translation_and_rotation() {
        let mut w = SvgWriter::new();
        w.open_document(PageSize::new(210.0, 297.0)).unwrap();
        w.polygon(
            "P1",
            dvec2(100.0, 50.0),
            315.0,
            &[dvec2(0.0, 0.0), dvec2(3.0, 0.0), dvec2(3.0, 2.0)],
            0.2625,
        )
        .unwrap();
        let out = w.finish().unwrap();
        assert!(out.contains("<g transform=\"translate(100,50)\">"));
        assert!(out.contains("transform=\"rotate(315)\""));
        assert!(out.contains("points=\"0,0 3,0 3,2\""));
        assert!(out.contains("fill: black;"));
    }
}
