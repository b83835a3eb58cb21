//! Glyph outline recording into kurbo paths

use kurbo::{BezPath, Point};
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::{GlyphId, MetadataProvider};

/// Pen that scales font units into document units and keeps y up
pub struct PathPen {
    path: BezPath,
    scale: f64,
    x_offset: f64,
}

impl PathPen {
    /// `scale` converts font units to millimetres; `x_offset` is added after scaling
    pub fn new(scale: f64, x_offset: f64) -> Self {
        Self {
            path: BezPath::new(),
            scale,
            x_offset,
        }
    }

    fn point(&self, x: f32, y: f32) -> Point {
        Point::new(
            x as f64 * self.scale + self.x_offset,
            y as f64 * self.scale,
        )
    }

    pub fn finish(self) -> BezPath {
        self.path
    }
}

impl OutlinePen for PathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.point(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        let (c, p) = (self.point(cx0, cy0), self.point(x, y));
        self.path.quad_to(c, p);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        let (c0, c1, p) = (self.point(cx0, cy0), self.point(cx1, cy1), self.point(x, y));
        self.path.curve_to(c0, c1, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

/// Draw one glyph in font units through `pen`
///
/// Returns `None` when the glyph has no outline entry or drawing fails.
pub fn draw_glyph<P: OutlinePen>(
    font: &skrifa::FontRef<'_>,
    glyph_id: GlyphId,
    pen: &mut P,
) -> Option<()> {
    let outlines = font.outline_glyphs();
    let settings = DrawSettings::unhinted(Size::unscaled(), LocationRef::default());
    outlines.get(glyph_id)?.draw(settings, pen).ok()?;
    Some(())
}
