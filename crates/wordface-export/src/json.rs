//! JSON export format
//!
//! One record per letter: where it sits, how big it is, and which LED on
//! the strip lights it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use wordface_core::{
    error::{ExportError, Result},
    traits::{Exporter, GlyphHost},
    types::{BoundBox, Placement, Vector},
    Document, FaceBuild, ObjectId, Wiring,
};

/// JSON exporter for built faces
///
/// ```ignore
/// use wordface_export::JsonExporter;
///
/// let json = JsonExporter::with_pretty_print().export(&document, &face)?;
/// std::fs::write("face.json", json)?;
/// ```
pub struct JsonExporter {
    pretty: bool,
    wiring: Wiring,
    lit: Option<HashSet<ObjectId>>,
}

impl JsonExporter {
    pub fn new() -> Self {
        Self {
            pretty: false,
            wiring: Wiring::default(),
            lit: None,
        }
    }

    pub fn with_pretty_print() -> Self {
        Self {
            pretty: true,
            ..Self::new()
        }
    }

    /// How LED indices are assigned
    pub fn with_wiring(mut self, wiring: Wiring) -> Self {
        self.wiring = wiring;
        self
    }

    /// Mark `ids` as lit; records carry `lit` only when this is set
    pub fn with_lit(mut self, ids: impl IntoIterator<Item = ObjectId>) -> Self {
        self.lit = Some(ids.into_iter().collect());
        self
    }

    /// Collect the records for a face
    pub fn record(&self, document: &Document, face: &FaceBuild) -> Result<FaceRecord> {
        let group = document.group(face.group)?;

        let glyphs = face
            .glyphs
            .iter()
            .map(|glyph| {
                let object = document.object(glyph.id)?;
                Ok(GlyphRecord {
                    name: object.name().to_string(),
                    label: object.label().to_string(),
                    row: glyph.cell.row,
                    column: glyph.cell.column,
                    ch: glyph.cell.ch.to_string(),
                    placement: object.placement().into(),
                    bounds: document.bounding_box(glyph.id)?.into(),
                    led: self
                        .wiring
                        .led_index(glyph.cell.row, glyph.cell.column, face.columns),
                    lit: self.lit.as_ref().map(|lit| lit.contains(&glyph.id)),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(FaceRecord {
            group: group.name().to_string(),
            rows: face.rows,
            columns: face.columns,
            spacing: [face.spacing.dx, face.spacing.dy],
            offset: xyz(face.offset),
            bounds: face.bounds.into(),
            wiring: self.wiring.as_str().to_string(),
            glyphs,
        })
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for JsonExporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn export(&self, document: &Document, face: &FaceBuild) -> Result<Vec<u8>> {
        let record = self.record(document, face)?;
        let json = if self.pretty {
            serde_json::to_string_pretty(&record)
        } else {
            serde_json::to_string(&record)
        }
        .map_err(|e| ExportError::EncodingFailed(e.to_string()))?;

        Ok(json.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }
}

/// The whole face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceRecord {
    pub group: String,
    pub rows: usize,
    pub columns: usize,
    /// `[dx, dy]` in millimetres
    pub spacing: [f64; 2],
    /// Shift applied by global centering
    pub offset: [f64; 3],
    pub bounds: BoxRecord,
    pub wiring: String,
    pub glyphs: Vec<GlyphRecord>,
}

/// One letter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphRecord {
    pub name: String,
    pub label: String,
    pub row: usize,
    pub column: usize,
    #[serde(rename = "char")]
    pub ch: String,
    pub placement: PlacementRecord,
    pub bounds: BoxRecord,
    pub led: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lit: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rotation: f64,
}

impl From<Placement> for PlacementRecord {
    fn from(placement: Placement) -> Self {
        Self {
            x: placement.base.x,
            y: placement.base.y,
            z: placement.base.z,
            rotation: placement.rotation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxRecord {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl From<BoundBox> for BoxRecord {
    fn from(b: BoundBox) -> Self {
        Self {
            min: [b.x_min, b.y_min, b.z_min],
            max: [b.x_max, b.y_max, b.z_max],
        }
    }
}

fn xyz(v: Vector) -> [f64; 3] {
    [v.x, v.y, v.z]
}
