//! Outline synthesis from real font files

use std::sync::Arc;

use kurbo::BezPath;
use skrifa::GlyphId;

use wordface_core::{
    error::{FontLoadError, Result, SynthesisError},
    traits::{FontRef, GlyphSynthesizer},
    types::{GlyphParams, GlyphShape},
};

use crate::outlines::{draw_glyph, PathPen};

/// Draws text with skrifa, one em = `params.size` millimetres
#[derive(Debug, Default, Clone, Copy)]
pub struct OutlineSynthesizer;

impl OutlineSynthesizer {
    pub fn new() -> Self {
        Self
    }
}

impl GlyphSynthesizer for OutlineSynthesizer {
    fn name(&self) -> &'static str {
        "skrifa-outline"
    }

    fn synthesize(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        params: &GlyphParams,
    ) -> Result<GlyphShape> {
        if !(params.size.is_finite() && params.size > 0.0) {
            return Err(SynthesisError::InvalidSize(params.size).into());
        }
        if text.is_empty() {
            return Err(SynthesisError::EmptyText.into());
        }

        let face = skrifa::FontRef::new(font.data()).map_err(|_| FontLoadError::InvalidData)?;
        let scale = params.size / f64::from(font.units_per_em());

        let mut outline = BezPath::new();
        let mut pen_x = 0.0;
        for (index, ch) in text.chars().enumerate() {
            if index > 0 {
                pen_x += params.tracking;
            }
            let glyph_id = font.glyph_id(ch).ok_or(SynthesisError::MissingGlyph(ch))?;

            let mut pen = PathPen::new(scale, pen_x);
            draw_glyph(&face, GlyphId::new(glyph_id), &mut pen)
                .ok_or(SynthesisError::OutlineFailed(ch))?;
            outline.extend(pen.finish().iter());

            pen_x += f64::from(font.advance_width(glyph_id)) * scale;
        }

        log::trace!("{:?}: {} path elements", text, outline.elements().len());

        Ok(GlyphShape {
            text: text.to_string(),
            size: params.size,
            outline,
        })
    }
}
