//! Wordface Core: letters on a grid, centered at the origin
//!
//! A word-clock face is a fixed table of characters. This crate turns that
//! table into a document of glyph outlines, one per cell, and lays them out
//! in five steps:
//!
//! 1. **Configuration** - The parameter table yields the LED pitch
//! 2. **Grid** - The 10x11 character table defines every cell
//! 3. **Synthesis** - Each character becomes an outline in the document
//! 4. **Cell centering** - Each outline is centered horizontally in its cell
//! 5. **Global centering** - The whole face is shifted onto the origin
//!
//! ## Build a face
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wordface_core::{Document, FaceGrid, FaceLayout, ParameterStore};
//! # use wordface_core::traits::{FontRef, GlyphSynthesizer};
//! # fn synthesizer() -> Arc<dyn GlyphSynthesizer> { unimplemented!() }
//! # fn load_font() -> Arc<dyn FontRef> { unimplemented!() }
//!
//! let store = ParameterStore::from_json_str(r#"{"Parameters": {"led_spacing": 16.6}}"#)?;
//! let layout = FaceLayout::from_parameters(&store, FaceGrid::german())?;
//!
//! let mut document = Document::new(synthesizer());
//! let face = layout.build(&mut document, load_font())?;
//! assert_eq!(face.glyphs.len(), 110);
//! # Ok::<(), wordface_core::WordfaceError>(())
//! ```
//!
//! The host side lives behind [`traits::GlyphHost`]; [`Document`] is the
//! in-memory implementation every exporter reads from.

pub mod document;
pub mod error;
pub mod grid;
pub mod layout;
pub mod params;
pub mod phrase;
pub mod plate;
pub mod traits;
pub mod wiring;

pub use document::{Document, GlyphObject, Group, GroupId, ObjectId};
pub use error::{Result, WordfaceError};
pub use grid::{Cell, FaceGrid, GERMAN_GRID};
pub use layout::{FaceBuild, FaceLayout, PlacedGlyph};
pub use params::{
    CellValue, ParameterStore, ParameterTable, ResolvedTable, LED_SPACING, PARAMETER_TABLE_NAMES,
};
pub use phrase::{Phrase, Word};
pub use plate::FrontPlate;
pub use traits::{Exporter, GlyphHost, GlyphSynthesizer};
pub use wiring::Wiring;

/// The geometric vocabulary shared by the document, layout and exporters
pub mod types {
    use kurbo::{Affine, BezPath, Rect};
    use std::ops::{Add, AddAssign, Neg, Sub};

    /// Unique identifier for a glyph within a font
    pub type GlyphId = u32;

    /// A point or displacement in document space (millimetres, y up)
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct Vector {
        pub x: f64,
        pub y: f64,
        pub z: f64,
    }

    impl Vector {
        pub const ZERO: Vector = Vector::new(0.0, 0.0, 0.0);

        pub const fn new(x: f64, y: f64, z: f64) -> Self {
            Self { x, y, z }
        }

        /// Largest per-axis magnitude
        pub fn max_abs(&self) -> f64 {
            self.x.abs().max(self.y.abs()).max(self.z.abs())
        }
    }

    impl Add for Vector {
        type Output = Vector;

        fn add(self, rhs: Vector) -> Vector {
            Vector::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
        }
    }

    impl AddAssign for Vector {
        fn add_assign(&mut self, rhs: Vector) {
            *self = *self + rhs;
        }
    }

    impl Sub for Vector {
        type Output = Vector;

        fn sub(self, rhs: Vector) -> Vector {
            Vector::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
        }
    }

    impl Neg for Vector {
        type Output = Vector;

        fn neg(self) -> Vector {
            Vector::new(-self.x, -self.y, -self.z)
        }
    }

    /// Where an object sits: a base offset plus a rotation about Z
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct Placement {
        pub base: Vector,
        /// Counter-clockwise rotation about the Z axis, in radians
        pub rotation: f64,
    }

    impl Placement {
        pub const IDENTITY: Placement = Placement {
            base: Vector::ZERO,
            rotation: 0.0,
        };

        pub fn at(base: Vector) -> Self {
            Self {
                base,
                rotation: 0.0,
            }
        }

        /// The planar transform this placement applies to local geometry
        pub fn affine(&self) -> Affine {
            Affine::translate((self.base.x, self.base.y)) * Affine::rotate(self.rotation)
        }
    }

    /// Axis-aligned bounding box in document space
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct BoundBox {
        pub x_min: f64,
        pub y_min: f64,
        pub z_min: f64,
        pub x_max: f64,
        pub y_max: f64,
        pub z_max: f64,
    }

    impl BoundBox {
        /// Lift a planar rectangle to a flat box at height `z`
        pub fn from_rect(rect: Rect, z: f64) -> Self {
            Self {
                x_min: rect.x0,
                y_min: rect.y0,
                z_min: z,
                x_max: rect.x1,
                y_max: rect.y1,
                z_max: z,
            }
        }

        /// A zero-size box at a single point
        pub fn point(at: Vector) -> Self {
            Self {
                x_min: at.x,
                y_min: at.y,
                z_min: at.z,
                x_max: at.x,
                y_max: at.y,
                z_max: at.z,
            }
        }

        pub fn x_length(&self) -> f64 {
            self.x_max - self.x_min
        }

        pub fn y_length(&self) -> f64 {
            self.y_max - self.y_min
        }

        pub fn center(&self) -> Vector {
            Vector::new(
                (self.x_min + self.x_max) / 2.0,
                (self.y_min + self.y_max) / 2.0,
                (self.z_min + self.z_max) / 2.0,
            )
        }

        /// Smallest box enclosing both
        pub fn union(&self, other: &BoundBox) -> BoundBox {
            BoundBox {
                x_min: self.x_min.min(other.x_min),
                y_min: self.y_min.min(other.y_min),
                z_min: self.z_min.min(other.z_min),
                x_max: self.x_max.max(other.x_max),
                y_max: self.y_max.max(other.y_max),
                z_max: self.z_max.max(other.z_max),
            }
        }

        /// Whether `other` lies entirely inside this box in the XY plane
        pub fn contains_xy(&self, other: &BoundBox) -> bool {
            other.x_min >= self.x_min
                && other.x_max <= self.x_max
                && other.y_min >= self.y_min
                && other.y_max <= self.y_max
        }
    }

    /// Horizontal and vertical pitch of the character grid
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Spacing {
        pub dx: f64,
        pub dy: f64,
    }

    impl Spacing {
        /// Same pitch for rows and columns, as the LED matrix uses
        pub const fn uniform(pitch: f64) -> Self {
            Self { dx: pitch, dy: pitch }
        }
    }

    /// How glyph synthesis should behave
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct GlyphParams {
        /// Nominal em height in millimetres
        pub size: f64,
        /// Extra space between characters in millimetres
        pub tracking: f64,
    }

    impl GlyphParams {
        pub const fn with_size(size: f64) -> Self {
            Self {
                size,
                tracking: 0.0,
            }
        }
    }

    impl Default for GlyphParams {
        fn default() -> Self {
            Self::with_size(crate::layout::DEFAULT_FONT_SIZE)
        }
    }

    /// What synthesis produces: outline geometry in local coordinates
    #[derive(Debug, Clone)]
    pub struct GlyphShape {
        pub text: String,
        pub size: f64,
        /// Outline in millimetres, y up, baseline start at the origin
        pub outline: BezPath,
    }

    impl GlyphShape {
        pub fn is_empty(&self) -> bool {
            self.outline.elements().is_empty()
        }
    }
}

/// Simple RGBA color for exported faces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn black() -> Self {
        Self::rgba(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        Self::rgba(255, 255, 255, 255)
    }

    /// Light grey used for letters that are not lit
    pub const fn dim() -> Self {
        Self::rgba(200, 200, 200, 255)
    }

    /// Parse `RRGGBB` or `RRGGBBAA`, with or without a leading `#`
    pub fn parse_hex(text: &str) -> Option<Self> {
        let hex = text.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();

        match hex.len() {
            6 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}
