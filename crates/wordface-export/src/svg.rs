//! SVG export of a face
//!
//! Coordinates stay in millimetres. The document is y up, SVG is y down, so
//! every point is flipped on the way out.

use std::collections::HashSet;
use std::fmt::Write as FmtWrite;

use kurbo::{BezPath, PathEl};
use wordface_core::{
    error::{ExportError, Result},
    traits::Exporter,
    types::BoundBox,
    Color, Document, FaceBuild, FrontPlate, ObjectId,
};

/// Draws every letter of a face as an SVG path
#[derive(Debug, Clone)]
pub struct SvgExporter {
    /// Margin around the drawing in millimetres
    padding: f64,
    foreground: Color,
    dim: Color,
    /// When set, only these objects use the foreground color
    lit: Option<HashSet<ObjectId>>,
    plate: Option<FrontPlate>,
}

impl SvgExporter {
    pub fn new() -> Self {
        Self {
            padding: 10.0,
            foreground: Color::black(),
            dim: Color::dim(),
            lit: None,
            plate: None,
        }
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    pub fn with_dim(mut self, color: Color) -> Self {
        self.dim = color;
        self
    }

    /// Light only `ids`; every other letter is drawn dim
    pub fn with_lit(mut self, ids: impl IntoIterator<Item = ObjectId>) -> Self {
        self.lit = Some(ids.into_iter().collect());
        self
    }

    /// Draw the plate outline and size the canvas to it
    pub fn with_plate(mut self, plate: FrontPlate) -> Self {
        self.plate = Some(plate);
        self
    }

    fn color_for(&self, id: ObjectId) -> Color {
        match &self.lit {
            Some(lit) if !lit.contains(&id) => self.dim,
            _ => self.foreground,
        }
    }

    fn canvas(&self, face: &FaceBuild) -> BoundBox {
        match &self.plate {
            Some(plate) => plate.bounds().union(&face.bounds),
            None => face.bounds,
        }
    }

    /// Render the face as an SVG document
    pub fn render(&self, document: &Document, face: &FaceBuild) -> Result<String> {
        let canvas = self.canvas(face);
        let x = canvas.x_min - self.padding;
        let y = -canvas.y_max - self.padding;
        let width = canvas.x_length() + self.padding * 2.0;
        let height = canvas.y_length() + self.padding * 2.0;

        let mut svg = String::new();
        writeln!(&mut svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#).map_err(write_failed)?;
        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.2} {:.2} {:.2} {:.2}" width="{:.2}mm" height="{:.2}mm">"#,
            x, y, width, height, width, height
        )
        .map_err(write_failed)?;

        if let Some(plate) = &self.plate {
            let bounds = plate.bounds();
            writeln!(
                &mut svg,
                r#"  <rect id="FrontPlate" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="{}" stroke-width="0.5"/>"#,
                bounds.x_min,
                -bounds.y_max,
                bounds.x_length(),
                bounds.y_length(),
                rgb(self.dim)
            )
            .map_err(write_failed)?;
        }

        let group = document.group(face.group)?;
        writeln!(&mut svg, r#"  <g id="{}">"#, escape(group.name())).map_err(write_failed)?;

        for glyph in &face.glyphs {
            let object = document.object(glyph.id)?;
            let d = path_data(&object.placed_outline());
            if d.is_empty() {
                continue;
            }
            let color = self.color_for(glyph.id);
            writeln!(
                &mut svg,
                r#"    <path id="{}" d="{}" fill="{}" fill-opacity="{:.2}"/>"#,
                escape(object.label()),
                d,
                rgb(color),
                color.a as f64 / 255.0
            )
            .map_err(write_failed)?;
        }

        writeln!(&mut svg, "  </g>").map_err(write_failed)?;
        writeln!(&mut svg, "</svg>").map_err(write_failed)?;

        log::debug!("SVG: {} glyphs, {:.1}x{:.1} mm", face.glyphs.len(), width, height);
        Ok(svg)
    }
}

impl Default for SvgExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for SvgExporter {
    fn name(&self) -> &'static str {
        "svg"
    }

    fn export(&self, document: &Document, face: &FaceBuild) -> Result<Vec<u8>> {
        Ok(self.render(document, face)?.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "svg"
    }

    fn mime_type(&self) -> &'static str {
        "image/svg+xml"
    }
}

fn write_failed(e: std::fmt::Error) -> ExportError {
    ExportError::WriteFailed(e.to_string())
}

fn rgb(color: Color) -> String {
    format!("rgb({},{},{})", color.r, color.g, color.b)
}

/// SVG path commands for a y-up path, flipped to y down
pub fn path_data(path: &BezPath) -> String {
    let mut d = String::new();
    for element in path.elements() {
        // Writing to a String cannot fail
        let _ = match *element {
            PathEl::MoveTo(p) => write!(&mut d, "M{:.2},{:.2}", p.x, -p.y),
            PathEl::LineTo(p) => write!(&mut d, "L{:.2},{:.2}", p.x, -p.y),
            PathEl::QuadTo(c, p) => {
                write!(&mut d, "Q{:.2},{:.2} {:.2},{:.2}", c.x, -c.y, p.x, -p.y)
            },
            PathEl::CurveTo(c0, c1, p) => write!(
                &mut d,
                "C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
                c0.x, -c0.y, c1.x, -c1.y, p.x, -p.y
            ),
            PathEl::ClosePath => write!(&mut d, "Z"),
        };
    }
    d
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
