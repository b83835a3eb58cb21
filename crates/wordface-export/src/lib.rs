//! Exporters for finished faces
//!
//! Both exporters read the face straight from its [`Document`]: SVG draws the
//! placed outlines, JSON records where every letter ended up.
//!
//! [`Document`]: wordface_core::Document

use std::collections::HashSet;

use wordface_core::{Cell, FaceBuild, ObjectId};

pub mod json;
pub mod svg;

pub use json::JsonExporter;
pub use svg::SvgExporter;

/// Objects standing in `cells`, ready for `with_lit`
pub fn lit_objects(face: &FaceBuild, cells: &[Cell]) -> HashSet<ObjectId> {
    face.objects_for(cells).into_iter().collect()
}
