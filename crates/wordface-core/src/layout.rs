//! Face layout: one glyph per cell, centered in its cell, then on the origin
//!
//! The layout talks to the document only through [`GlyphHost`], so the same
//! procedure runs against the in-memory [`crate::Document`] and any other host.
//!
//! Per cell the glyph is centered horizontally only. Its vertical placement
//! stays on the row baseline so that letters of one row share a baseline.

use std::sync::Arc;

use crate::{
    document::{GroupId, ObjectId},
    error::{ConfigError, LayoutError, Result},
    grid::{Cell, FaceGrid},
    params::{ParameterStore, ResolvedTable, LED_SPACING},
    plate::FrontPlate,
    traits::{FontRef, GlyphHost},
    types::{BoundBox, GlyphParams, Spacing, Vector},
};

/// Name of the group holding every letter
pub const GROUP_NAME: &str = "WordclockLetters";

/// Nominal glyph height in millimetres
pub const DEFAULT_FONT_SIZE: f64 = 22.0;

/// Distance from the origin below which a face counts as centered
pub const CENTERING_EPSILON: f64 = 1e-6;

/// A glyph object together with the cell it was built for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub cell: Cell,
    pub id: ObjectId,
}

/// What [`FaceLayout::build`] leaves behind
#[derive(Debug, Clone)]
pub struct FaceBuild {
    pub group: GroupId,
    /// Glyphs in row-major order
    pub glyphs: Vec<PlacedGlyph>,
    /// Shift applied by the global centering pass
    pub offset: Vector,
    /// Union of all glyph boxes after centering
    pub bounds: BoundBox,
    pub rows: usize,
    pub columns: usize,
    pub spacing: Spacing,
}

impl FaceBuild {
    pub fn glyph_at(&self, row: usize, column: usize) -> Option<&PlacedGlyph> {
        self.glyphs
            .iter()
            .find(|glyph| glyph.cell.row == row && glyph.cell.column == column)
    }

    /// Objects standing in the given cells, in the order given
    pub fn objects_for(&self, cells: &[Cell]) -> Vec<ObjectId> {
        cells
            .iter()
            .filter_map(|cell| self.glyph_at(cell.row, cell.column))
            .map(|glyph| glyph.id)
            .collect()
    }
}

/// Everything needed to lay out a face
#[derive(Debug, Clone)]
pub struct FaceLayout {
    grid: FaceGrid,
    spacing: Spacing,
    glyph: GlyphParams,
    origin: Vector,
    target: Vector,
    group_name: String,
    plate: Option<FrontPlate>,
}

impl FaceLayout {
    pub fn new(grid: FaceGrid, spacing: Spacing) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(spacing.dx) || !valid(spacing.dy) {
            return Err(ConfigError::InvalidSpacing {
                dx: spacing.dx,
                dy: spacing.dy,
            }
            .into());
        }

        Ok(Self {
            grid,
            spacing,
            glyph: GlyphParams::default(),
            origin: Vector::ZERO,
            target: Vector::ZERO,
            group_name: GROUP_NAME.to_string(),
            plate: None,
        })
    }

    /// Read `led_spacing` from the first parameter table found
    ///
    /// Fails before touching any document when no table exists.
    pub fn from_parameters(store: &ParameterStore, grid: FaceGrid) -> Result<Self> {
        Self::from_table(&store.parameters()?, grid)
    }

    /// Read `led_spacing` from an already resolved table
    pub fn from_table(table: &ResolvedTable<'_>, grid: FaceGrid) -> Result<Self> {
        let pitch = table.number(LED_SPACING)?;
        log::info!("led_spacing = {} mm (table '{}')", pitch, table.name);
        Self::new(grid, Spacing::uniform(pitch))
    }

    pub fn with_glyph_params(mut self, params: GlyphParams) -> Self {
        self.glyph = params;
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.glyph.size = size;
        self
    }

    /// Where cell (0, 0) starts before centering
    pub fn with_origin(mut self, origin: Vector) -> Self {
        self.origin = origin;
        self
    }

    /// Where the face center ends up
    pub fn with_target(mut self, target: Vector) -> Self {
        self.target = target;
        self
    }

    pub fn with_group_name(mut self, name: &str) -> Self {
        self.group_name = name.to_string();
        self
    }

    /// Check the finished face against a front plate
    pub fn with_plate(mut self, plate: FrontPlate) -> Self {
        self.plate = Some(plate);
        self
    }

    pub fn grid(&self) -> &FaceGrid {
        &self.grid
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    pub fn glyph_params(&self) -> GlyphParams {
        self.glyph
    }

    /// Create, center and group every letter, then center the face
    pub fn build<H: GlyphHost + ?Sized>(
        &self,
        host: &mut H,
        font: Arc<dyn FontRef>,
    ) -> Result<FaceBuild> {
        log::info!(
            "Laying out {}x{} face: pitch {}x{} mm, glyph size {} mm",
            self.grid.rows(),
            self.grid.columns(),
            self.spacing.dx,
            self.spacing.dy,
            self.glyph.size
        );

        let group = host.add_group(&self.group_name)?;
        let mut glyphs = Vec::with_capacity(self.grid.len());

        for cell in self.grid.cells() {
            let id = self.place_glyph(host, cell, font.clone())?;
            host.add_to_group(group, id)?;
            glyphs.push(PlacedGlyph { cell, id });
        }

        host.recompute()?;
        let offset = center_group(host, group, self.target)?;
        let bounds = union_bounds(host, group)?;

        if let Some(plate) = &self.plate {
            let margin = plate.margin(&bounds);
            if plate.contains(&bounds) {
                log::debug!("Front plate margin: {:.1} mm", margin);
            } else {
                log::warn!(
                    "Letters span {:.1}x{:.1} mm, {:.1} mm past the {:.1} mm front plate",
                    bounds.x_length(),
                    bounds.y_length(),
                    -margin,
                    plate.side_length
                );
            }
        }

        Ok(FaceBuild {
            group,
            glyphs,
            offset,
            bounds,
            rows: self.grid.rows(),
            columns: self.grid.columns(),
            spacing: self.spacing,
        })
    }

    /// Synthesize one letter and center it horizontally in its cell
    pub fn place_glyph<H: GlyphHost + ?Sized>(
        &self,
        host: &mut H,
        cell: Cell,
        font: Arc<dyn FontRef>,
    ) -> Result<ObjectId> {
        let id = host.synthesize_glyph(&cell.ch.to_string(), font, &self.glyph)?;

        // Geometry is lazy; the box is only valid after a recompute
        host.recompute()?;
        let width = host.bounding_box(id)?.x_length();
        let x_offset = cell_offset(self.spacing.dx, width);

        let mut placement = host.placement(id)?;
        placement.base = cell.base(self.origin, self.spacing) + Vector::new(x_offset, 0.0, 0.0);
        host.set_placement(id, placement)?;
        host.set_label(id, &cell.label())?;

        log::debug!(
            "{} width {:.3} mm, x offset {:.3} mm",
            cell.label(),
            width,
            x_offset
        );

        Ok(id)
    }
}

/// Horizontal shift that centers a glyph of `width` in a cell of `dx`
pub fn cell_offset(dx: f64, width: f64) -> f64 {
    (dx - width) / 2.0
}

/// Union of the bounding boxes of every group member
pub fn union_bounds<H: GlyphHost + ?Sized>(host: &H, group: GroupId) -> Result<BoundBox> {
    let members = host.group_members(group)?;
    let mut boxes = members.iter().map(|&id| host.bounding_box(id));

    let Some(first) = boxes.next() else {
        return Err(LayoutError::EmptyGroup(host.group_name(group)?).into());
    };

    boxes.try_fold(first?, |acc, bbox| Ok(acc.union(&bbox?)))
}

/// Shift every member so the union center lands on `target`
///
/// The document must be up to date. Returns the applied offset; a second call
/// on an already centered group returns an offset of (almost) zero.
pub fn center_group<H: GlyphHost + ?Sized>(
    host: &mut H,
    group: GroupId,
    target: Vector,
) -> Result<Vector> {
    let bounds = union_bounds(host, group)?;
    let center = bounds.center();
    let offset = target - Vector::new(center.x, center.y, 0.0);

    for id in host.group_members(group)? {
        let mut placement = host.placement(id)?;
        placement.base += offset;
        host.set_placement(id, placement)?;
    }

    host.recompute()?;
    log::info!(
        "Centered '{}' by ({:.3}, {:.3}, {:.3})",
        host.group_name(group)?,
        offset.x,
        offset.y,
        offset.z
    );

    Ok(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::testing::{document, font, BoxSynthesizer};
    use crate::error::DocumentError;
    use crate::WordfaceError;
    use proptest::prelude::*;

    fn german(pitch: f64) -> FaceLayout {
        FaceLayout::new(FaceGrid::german(), Spacing::uniform(pitch)).unwrap()
    }

    #[test]
    fn test_builds_110_labelled_glyphs() {
        let mut doc = document();
        let face = german(16.6).build(&mut doc, font()).unwrap();

        assert_eq!(face.glyphs.len(), 110);
        assert_eq!(doc.object_count(), 110);
        let group = doc.group(face.group).unwrap();
        assert_eq!(group.name(), GROUP_NAME);
        assert_eq!(group.members().len(), 110);

        let first = doc.object(face.glyphs[0].id).unwrap();
        assert_eq!(first.label(), "Letter_01_01_E");
        let last = doc.object(face.glyphs[109].id).unwrap();
        assert_eq!(last.label(), "Letter_10_11_R");
    }

    #[test]
    fn test_first_row_scenario() {
        let grid = FaceGrid::new(["ESKISTAFÜNF"]).unwrap();
        let layout = FaceLayout::new(grid, Spacing::uniform(10.0))
            .unwrap()
            .with_font_size(22.0);
        let mut doc = document();
        let face = layout.build(&mut doc, font()).unwrap();

        assert_eq!(face.glyphs.len(), 11);
        for glyph in &face.glyphs {
            let c = glyph.cell.column as f64;
            let width = BoxSynthesizer::width_of(glyph.cell.ch, 22.0);
            let expected_x = c * 10.0 + (10.0 - width) / 2.0;
            let placement = doc.object(glyph.id).unwrap().placement();
            // Undo the global shift to see the per-cell placement
            let local = placement.base - face.offset;
            assert!((local.x - expected_x).abs() < 1e-9, "{:?}", glyph.cell);
            assert!(local.y.abs() < 1e-9);
        }
    }

    #[test]
    fn test_place_glyph_keeps_row_baseline() {
        let layout = german(12.0);
        let mut doc = document();
        let cell = layout.grid().cell(3, 4).unwrap();
        let id = layout.place_glyph(&mut doc, cell, font()).unwrap();

        let placement = doc.object(id).unwrap().placement();
        let width = BoxSynthesizer::width_of(cell.ch, DEFAULT_FONT_SIZE);
        assert!((placement.base.x - (48.0 + (12.0 - width) / 2.0)).abs() < 1e-9);
        assert_eq!(placement.base.y, -36.0);
        assert_eq!(doc.object(id).unwrap().label(), "Letter_04_05_U");
    }

    #[test]
    fn test_rows_descend_columns_advance() {
        let mut doc = document();
        let face = german(10.0).build(&mut doc, font()).unwrap();
        let base = |row, col| {
            let glyph = face.glyph_at(row, col).unwrap();
            doc.object(glyph.id).unwrap().placement().base
        };
        assert!(base(1, 0).y < base(0, 0).y);
        assert!(base(0, 1).x > base(0, 0).x);
        assert!((base(0, 0).y - base(9, 0).y - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_face_is_centered_on_origin() {
        let mut doc = document();
        let face = german(16.6).build(&mut doc, font()).unwrap();
        let bounds = union_bounds(&doc, face.group).unwrap();
        assert!(bounds.center().max_abs() < CENTERING_EPSILON);
        assert_eq!(bounds, face.bounds);
        assert!(!doc.is_touched());
    }

    #[test]
    fn test_centering_is_a_fixed_point() {
        let mut doc = document();
        let face = german(16.6).build(&mut doc, font()).unwrap();
        let second = center_group(&mut doc, face.group, Vector::ZERO).unwrap();
        assert!(second.max_abs() < CENTERING_EPSILON);
    }

    #[test]
    fn test_centering_on_custom_target() {
        let mut doc = document();
        let target = Vector::new(100.0, -50.0, 0.0);
        let face = german(10.0).with_target(target).build(&mut doc, font()).unwrap();
        let center = face.bounds.center();
        assert!((center.x - 100.0).abs() < CENTERING_EPSILON);
        assert!((center.y + 50.0).abs() < CENTERING_EPSILON);
    }

    #[test]
    fn test_empty_group_fails_fast() {
        let mut doc = document();
        let group = doc.add_group("Nothing").unwrap();
        let err = center_group(&mut doc, group, Vector::ZERO).unwrap_err();
        assert!(matches!(
            err,
            WordfaceError::Layout(LayoutError::EmptyGroup(ref name)) if name == "Nothing"
        ));
    }

    #[test]
    fn test_centering_requires_recompute() {
        let mut doc = document();
        let group = doc.add_group("Letters").unwrap();
        let id = doc
            .synthesize_glyph("A", font(), &GlyphParams::with_size(10.0))
            .unwrap();
        doc.add_to_group(group, id).unwrap();
        assert!(matches!(
            center_group(&mut doc, group, Vector::ZERO),
            Err(WordfaceError::Document(DocumentError::StaleGeometry(_)))
        ));
    }

    #[test]
    fn test_missing_table_creates_nothing() {
        let store = ParameterStore::from_json_str(r#"{"Other": {"led_spacing": 10}}"#).unwrap();
        let doc = document();
        let result = FaceLayout::from_parameters(&store, FaceGrid::german());
        assert!(matches!(
            result,
            Err(WordfaceError::Config(ConfigError::TableNotFound { .. }))
        ));
        assert_eq!(doc.object_count(), 0);
    }

    #[test]
    fn test_from_parameters_uses_led_spacing_both_ways() {
        let store =
            ParameterStore::from_json_str(r#"{"Parameters": {"led_spacing": "16.6 mm"}}"#).unwrap();
        let layout = FaceLayout::from_parameters(&store, FaceGrid::german()).unwrap();
        assert_eq!(layout.spacing(), Spacing::uniform(16.6));
    }

    #[test]
    fn test_from_table_reuses_resolved_table() {
        let store = ParameterStore::from_json_str(
            r#"{"Spreadsheet": {"led_spacing": 12, "plate_side": "300 mm", "engrave": false}}"#,
        )
        .unwrap();
        let table = store.parameters().unwrap();
        let layout = FaceLayout::from_table(&table, FaceGrid::german()).unwrap();
        assert_eq!(layout.spacing(), Spacing::uniform(12.0));
        assert_eq!(table.optional_number("plate_side").unwrap(), Some(300.0));
    }

    #[test]
    fn test_invalid_spacing_rejected() {
        assert!(FaceLayout::new(FaceGrid::german(), Spacing::uniform(0.0)).is_err());
        assert!(FaceLayout::new(FaceGrid::german(), Spacing::uniform(f64::NAN)).is_err());
        assert!(FaceLayout::new(
            FaceGrid::german(),
            Spacing {
                dx: 10.0,
                dy: -1.0
            }
        )
        .is_err());
    }

    #[test]
    fn test_objects_for_cells() {
        let mut doc = document();
        let face = german(10.0).build(&mut doc, font()).unwrap();
        let cells = [face.glyphs[3].cell, face.glyphs[0].cell];
        assert_eq!(face.objects_for(&cells), vec![face.glyphs[3].id, face.glyphs[0].id]);
    }

    proptest! {
        #[test]
        fn prop_cell_centering_formula(dx in 5.0f64..40.0, size in 4.0f64..30.0) {
            let layout = FaceLayout::new(FaceGrid::german(), Spacing::uniform(dx))
                .unwrap()
                .with_font_size(size);
            let mut doc = document();
            for cell in layout.grid().cells().step_by(7) {
                let id = layout.place_glyph(&mut doc, cell, font()).unwrap();
                let width = BoxSynthesizer::width_of(cell.ch, size);
                let base = cell.base(Vector::ZERO, layout.spacing());
                let placement = doc.object(id).unwrap().placement();
                prop_assert!((placement.base.x - (base.x + (dx - width) / 2.0)).abs() < 1e-9);
                prop_assert!((placement.base.y - base.y).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_face_center_is_origin(
            dx in 5.0f64..40.0,
            dy in 5.0f64..40.0,
            size in 4.0f64..30.0,
        ) {
            let layout = FaceLayout::new(FaceGrid::german(), Spacing { dx, dy })
                .unwrap()
                .with_font_size(size);
            let mut doc = document();
            let face = layout.build(&mut doc, font()).unwrap();
            let center = union_bounds(&doc, face.group).unwrap().center();
            prop_assert!(center.max_abs() < CENTERING_EPSILON);

            let again = center_group(&mut doc, face.group, Vector::ZERO).unwrap();
            prop_assert!(again.max_abs() < CENTERING_EPSILON);
        }
    }
}
