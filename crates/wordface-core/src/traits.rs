//! The seams between the layout and the outside world
//!
//! - [`FontRef`] - Raw font data and metrics
//! - [`GlyphSynthesizer`] - Where characters become outlines
//! - [`GlyphHost`] - The document that owns glyph objects, placements and groups
//! - [`Exporter`] - Where a finished face becomes bytes

use crate::{
    document::{Document, GroupId, ObjectId},
    error::Result,
    layout::FaceBuild,
    types::{BoundBox, GlyphId, GlyphParams, GlyphShape, Placement},
};
use std::sync::Arc;

/// Your window into font data
///
/// ```ignore
/// struct MyFont {
///     data: Vec<u8>,
/// }
///
/// impl FontRef for MyFont {
///     fn data(&self) -> &[u8] {
///         &self.data
///     }
///
///     fn units_per_em(&self) -> u16 {
///         1000
///     }
///
///     fn glyph_id(&self, ch: char) -> Option<GlyphId> {
///         Some(42)
///     }
///
///     fn advance_width(&self, glyph_id: GlyphId) -> f32 {
///         500.0
///     }
/// }
/// ```
pub trait FontRef: Send + Sync {
    /// Raw font bytes as they live in the file
    fn data(&self) -> &[u8];

    /// The font's internal coordinate system scale
    fn units_per_em(&self) -> u16;

    /// Find the glyph that represents this character
    ///
    /// Returns None when the font doesn't contain this character.
    fn glyph_id(&self, ch: char) -> Option<GlyphId>;

    /// Horizontal advance of this glyph in font units
    fn advance_width(&self, glyph_id: GlyphId) -> f32;

    /// How many glyphs this font contains
    fn glyph_count(&self) -> Option<u32> {
        None
    }
}

/// Turns text into outline geometry
///
/// The equivalent of a CAD "shape string": one call, one outline, sized in
/// millimetres with the baseline start at the local origin.
pub trait GlyphSynthesizer: Send + Sync {
    /// Identify yourself in logs and error messages
    fn name(&self) -> &'static str;

    /// Build the outline for `text`
    fn synthesize(
        &self,
        text: &str,
        font: Arc<dyn FontRef>,
        params: &GlyphParams,
    ) -> Result<GlyphShape>;
}

/// The document host a face is built inside
///
/// Geometry is derived lazily: after creating an object or changing its
/// placement, [`GlyphHost::bounding_box`] fails until [`GlyphHost::recompute`]
/// has brought the document up to date.
pub trait GlyphHost {
    /// Create a new glyph object with identity placement
    fn synthesize_glyph(
        &mut self,
        text: &str,
        font: Arc<dyn FontRef>,
        params: &GlyphParams,
    ) -> Result<ObjectId>;

    fn placement(&self, id: ObjectId) -> Result<Placement>;

    fn set_placement(&mut self, id: ObjectId, placement: Placement) -> Result<()>;

    /// Bounding box of the placed geometry; requires an up-to-date document
    fn bounding_box(&self, id: ObjectId) -> Result<BoundBox>;

    /// Human-readable label, metadata only
    fn set_label(&mut self, id: ObjectId, label: &str) -> Result<()>;

    /// Bring all derived geometry up to date
    fn recompute(&mut self) -> Result<()>;

    fn add_group(&mut self, name: &str) -> Result<GroupId>;

    fn add_to_group(&mut self, group: GroupId, id: ObjectId) -> Result<()>;

    /// Members in insertion order
    fn group_members(&self, group: GroupId) -> Result<Vec<ObjectId>>;

    fn group_name(&self, group: GroupId) -> Result<String>;
}

/// Where faces become files
pub trait Exporter {
    fn name(&self) -> &'static str;

    /// Serialize a built face read from its document
    fn export(&self, document: &Document, face: &FaceBuild) -> Result<Vec<u8>>;

    /// File extension without the dot
    fn extension(&self) -> &'static str;

    fn mime_type(&self) -> &'static str;
}
