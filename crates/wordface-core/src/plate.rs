//! The square front plate the letters are cut into

use crate::types::BoundBox;

/// Parameter cell that overrides the plate side length
pub const PLATE_SIDE: &str = "plate_side";

/// Square plate centered on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontPlate {
    /// Edge length in millimetres
    pub side_length: f64,
    /// Material thickness in millimetres
    pub thickness: f64,
}

impl FrontPlate {
    pub fn new(side_length: f64) -> Self {
        Self {
            side_length,
            ..Self::default()
        }
    }

    pub fn bounds(&self) -> BoundBox {
        let half = self.side_length / 2.0;
        BoundBox {
            x_min: -half,
            y_min: -half,
            z_min: -self.thickness,
            x_max: half,
            y_max: half,
            z_max: 0.0,
        }
    }

    /// Whether `letters` fit on the plate
    pub fn contains(&self, letters: &BoundBox) -> bool {
        self.bounds().contains_xy(letters)
    }

    /// Smallest distance from the letters to a plate edge; negative on overflow
    pub fn margin(&self, letters: &BoundBox) -> f64 {
        let plate = self.bounds();
        [
            letters.x_min - plate.x_min,
            plate.x_max - letters.x_max,
            letters.y_min - plate.y_min,
            plate.y_max - letters.y_max,
        ]
        .into_iter()
        .fold(f64::INFINITY, f64::min)
    }
}

impl Default for FrontPlate {
    fn default() -> Self {
        Self {
            side_length: 450.0,
            thickness: 2.0,
        }
    }
}
