use std::io::Write;

use anyhow::{Context, Result};
use svg::node::element::{Rectangle, Text};
use svg::{Document, Node};

use crate::layout::LayoutRect;

/// Label baseline offset from the band's top edge (px).
const LABEL_OFFSET: i32 = 10;

/// Collects placements into an SVG document: one filled rectangle plus one
/// text label per placed node.
pub struct SvgRenderer {
    document: Document,
    drawn: usize,
}

impl SvgRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        let document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0, 0, width, height));
        Self { document, drawn: 0 }
    }

    /// Draw one placement. Later placements paint over earlier ones, so
    /// children (emitted after their parent) end up on top.
    pub fn draw(&mut self, placement: &LayoutRect) {
        let r = placement.rect;
        self.document.append(
            Rectangle::new()
                .set("x", r.x0)
                .set("y", r.y0)
                .set("width", r.dx())
                .set("height", r.dy())
                .set("style", format!("fill: {};stroke: #fff;", placement.color)),
        );
        self.document.append(
            Text::new(placement.identity.as_str())
                .set("x", r.x0)
                .set("y", r.y0 + LABEL_OFFSET)
                .set("style", "font-size:10px;text-anchor: start;"),
        );
        self.drawn += 1;
    }

    /// Number of placements drawn so far.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// Serialize the document to `writer`.
    pub fn finish<W: Write>(self, writer: W) -> Result<()> {
        svg::write(writer, &self.document).context("writing SVG document")
    }
}
