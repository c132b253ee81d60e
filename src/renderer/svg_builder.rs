//! SVG document for one staff drawing. Elements are appended in paint
//! order; the root carries a `staffpad` class so hosts can target it.

use super::constants::*;

pub(super) struct SvgBuilder {
    elements: Vec<String>,
    width: f64,
    height: f64,
}

impl SvgBuilder {
    pub(super) fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
        }
    }

    /// Finish the document.
    pub(super) fn build(self) -> String {
        let header = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" class="staffpad" viewBox="0 0 {w} {h}" width="{w}" height="{h}" font-family="serif">"#,
            w = self.width,
            h = self.height
        );
        let body: String = self.elements.iter().map(|el| format!("  {el}\n")).collect();
        format!("{header}\n{body}</svg>\n")
    }

    pub(super) fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke) {
        self.elements.push(format!(
            r#"<line class="{}" x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}"/>"#,
            stroke.class, x1, y1, x2, y2, stroke.color, stroke.width
        ));
    }

    pub(super) fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        self.elements.push(format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            x, y, w, h, fill
        ));
    }

    /// Glyph or digit text. Content is always one of the renderer's own
    /// symbols, so it is written unescaped.
    pub(super) fn glyph(&mut self, x: f64, y: f64, content: &str, size: f64, bold: bool, anchor: &str) {
        let weight = if bold { "bold" } else { "normal" };
        self.elements.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.0}" font-weight="{}" fill="{}" text-anchor="{}">{}</text>"#,
            x, y, size, weight, NOTE_COLOR, anchor, content
        ));
    }

    /// Filled, slightly tilted notehead. `data-midi` lets a host map the
    /// drawn glyph back to its note.
    pub(super) fn notehead(&mut self, cx: f64, cy: f64, midi: i32) {
        self.elements.push(format!(
            r#"<ellipse cx="{:.1}" cy="{:.1}" rx="{:.1}" ry="{:.1}" fill="{}" data-midi="{}" transform="rotate(-15,{:.1},{:.1})"/>"#,
            cx, cy, NOTEHEAD_RX, NOTEHEAD_RY, NOTE_COLOR, midi, cx, cy
        ));
    }
}
