//! Fonts for the face: loading, coverage checks and outline synthesis
//!
//! [`Font`] keeps the raw bytes and parses tables on demand, so one loaded
//! file can back every glyph on the face. [`OutlineSynthesizer`] turns
//! characters into millimetre outlines through skrifa.

use std::fs;
use std::path::{Path, PathBuf};

use read_fonts::{FontRef as ReadFontRef, TableProvider};

use wordface_core::{
    error::{FontLoadError, Result},
    traits::FontRef,
    types::GlyphId,
};

pub mod outlines;
pub mod synth;

pub use synth::OutlineSynthesizer;

/// Where the face font lives, relative to the parameter file's directory
pub const DEFAULT_FONT_RELATIVE: &str = "fonts/Oxanium/static/Oxanium-Regular.ttf";

/// The default font path for parameters stored in `base_dir`
pub fn default_font_path(base_dir: impl AsRef<Path>) -> PathBuf {
    base_dir.as_ref().join(DEFAULT_FONT_RELATIVE)
}

/// A font file held in memory
pub struct Font {
    data: Vec<u8>,
    units_per_em: u16,
}

impl Font {
    /// Read a font file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data =
            fs::read(path).map_err(|_| FontLoadError::FileNotFound(path.display().to_string()))?;

        let font = Self::from_data(data)?;
        log::info!(
            "Loaded font {} ({} units/em, {} glyphs)",
            path.display(),
            font.units_per_em,
            font.glyph_count().unwrap_or(0)
        );
        Ok(font)
    }

    /// Parse raw font bytes
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        let font_ref = ReadFontRef::new(&data).map_err(|_| FontLoadError::InvalidData)?;

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);

        Ok(Font { data, units_per_em })
    }

    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::new(&self.data).ok()
    }

    pub fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        self.font_ref()
            .and_then(|font| font.cmap().ok()?.map_codepoint(ch).map(|gid| gid.to_u32()))
    }

    /// Advance width in font units
    pub fn advance_width(&self, glyph_id: GlyphId) -> f32 {
        self.font_ref()
            .and_then(|font| {
                let hmtx = font.hmtx().ok()?;
                let advance = hmtx.advance(read_fonts::types::GlyphId::new(glyph_id))?;
                Some(advance as f32)
            })
            .unwrap_or(0.0)
    }

    pub fn glyph_count(&self) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.maxp().ok().map(|maxp| maxp.num_glyphs() as u32))
    }

    /// Characters in `chars` the font cannot map, in the order given
    pub fn missing_chars(&self, chars: &[char]) -> Vec<char> {
        chars
            .iter()
            .copied()
            .filter(|&ch| self.glyph_id(ch).is_none())
            .collect()
    }

    /// Fail unless every character in `chars` has a glyph
    pub fn ensure_covers(&self, chars: &[char]) -> Result<()> {
        let missing = self.missing_chars(chars);
        if missing.is_empty() {
            return Ok(());
        }
        Err(FontLoadError::MissingCharacters(missing.into_iter().collect()).into())
    }
}

impl FontRef for Font {
    fn data(&self) -> &[u8] {
        &self.data
    }

    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        self.glyph_id(ch)
    }

    fn advance_width(&self, glyph_id: GlyphId) -> f32 {
        self.advance_width(glyph_id)
    }

    fn glyph_count(&self) -> Option<u32> {
        self.glyph_count()
    }
}
