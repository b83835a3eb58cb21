//! The character grid behind the face
//!
//! Rows run top to bottom and map to decreasing Y; columns run left to right
//! and map to increasing X. Cells are derived on demand, never stored.

use crate::{
    error::{ConfigError, Result},
    types::{Spacing, Vector},
};

/// The German word-clock layout: 10 rows of 11 characters
pub const GERMAN_GRID: [&str; 10] = [
    "ESKISTAFÜNF",
    "ZEHNZWANZIG",
    "DREIVIERTEL",
    "VORFUNKNACH",
    "HALBAELFÜNF",
    "EINSXAMZWEI",
    "DREIPMJVIER",
    "SECHSNLACHT",
    "SIEBENZWÖLF",
    "ZEHNEUNKUHR",
];

/// One character at a grid position (zero-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
    pub ch: char,
}

impl Cell {
    /// Label of the form `Letter_RR_CC_<char>`, 1-indexed
    pub fn label(&self) -> String {
        format!("Letter_{:02}_{:02}_{}", self.row + 1, self.column + 1, self.ch)
    }

    /// Lower-left corner of the cell before any centering
    pub fn base(&self, origin: Vector, spacing: Spacing) -> Vector {
        origin
            + Vector::new(
                self.column as f64 * spacing.dx,
                -(self.row as f64) * spacing.dy,
                0.0,
            )
    }
}

/// Rectangular table of characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceGrid {
    rows: Vec<Vec<char>>,
}

impl FaceGrid {
    /// The built-in German layout
    pub fn german() -> Self {
        Self {
            rows: GERMAN_GRID.iter().map(|row| row.chars().collect()).collect(),
        }
    }

    /// Build a grid from rows that must all hold the same number of characters
    pub fn new<I, S>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows: Vec<Vec<char>> = rows
            .into_iter()
            .map(|row| row.as_ref().chars().collect())
            .collect();

        let Some(first) = rows.first() else {
            return Err(ConfigError::InvalidGrid("grid has no rows".into()).into());
        };
        let columns = first.len();
        if columns == 0 {
            return Err(ConfigError::InvalidGrid("first row is empty".into()).into());
        }

        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(ConfigError::InvalidGrid(format!(
                    "row {} has {} characters, expected {}",
                    index + 1,
                    row.len(),
                    columns
                ))
                .into());
            }
            if let Some(ch) = row.iter().find(|ch| ch.is_whitespace() || ch.is_control()) {
                return Err(ConfigError::InvalidGrid(format!(
                    "row {} contains unprintable character {:?}",
                    index + 1,
                    ch
                ))
                .into());
            }
        }

        Ok(Self { rows })
    }

    /// Parse one row per line; blank lines and `#` comments are skipped
    pub fn parse(text: &str) -> Result<Self> {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn len(&self) -> usize {
        self.rows() * self.columns()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        let ch = *self.rows.get(row)?.get(column)?;
        Some(Cell { row, column, ch })
    }

    /// Every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, chars)| {
            chars
                .iter()
                .enumerate()
                .map(move |(column, &ch)| Cell { row, column, ch })
        })
    }

    pub fn row_text(&self, row: usize) -> Option<String> {
        self.rows.get(row).map(|chars| chars.iter().collect())
    }

    /// Column where `word` first appears in `row`
    pub fn find_in_row(&self, row: usize, word: &str) -> Option<usize> {
        let chars = self.rows.get(row)?;
        let needle: Vec<char> = word.chars().collect();
        if needle.is_empty() || needle.len() > chars.len() {
            return None;
        }
        chars
            .windows(needle.len())
            .position(|window| window == needle.as_slice())
    }

    /// Distinct characters the grid needs a font to cover, in first-seen order
    pub fn charset(&self) -> Vec<char> {
        let mut seen = Vec::new();
        for cell in self.cells() {
            if !seen.contains(&cell.ch) {
                seen.push(cell.ch);
            }
        }
        seen
    }
}

impl Default for FaceGrid {
    fn default() -> Self {
        Self::german()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_german_grid_dimensions() {
        let grid = FaceGrid::german();
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.columns(), 11);
        assert_eq!(grid.cells().count(), 110);
        // Umlauts count as one cell each
        assert!(GERMAN_GRID.iter().all(|row| row.chars().count() == 11));
    }

    #[test]
    fn test_cells_are_row_major() {
        let grid = FaceGrid::german();
        let cells: Vec<Cell> = grid.cells().take(13).collect();
        assert_eq!(cells[0], Cell { row: 0, column: 0, ch: 'E' });
        assert_eq!(cells[8], Cell { row: 0, column: 8, ch: 'Ü' });
        assert_eq!(cells[11], Cell { row: 1, column: 0, ch: 'Z' });
    }

    #[test]
    fn test_labels_are_one_indexed_and_unique() {
        let grid = FaceGrid::german();
        assert_eq!(grid.cell(0, 0).unwrap().label(), "Letter_01_01_E");
        assert_eq!(grid.cell(8, 9).unwrap().label(), "Letter_09_10_L");
        assert_eq!(grid.cell(9, 10).unwrap().label(), "Letter_10_11_R");

        let mut labels: Vec<String> = grid.cells().map(|c| c.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 110);
    }

    #[test]
    fn test_cell_base_maps_rows_down() {
        let cell = Cell { row: 2, column: 3, ch: 'X' };
        let base = cell.base(Vector::ZERO, Spacing { dx: 10.0, dy: 12.0 });
        assert_eq!(base, Vector::new(30.0, -24.0, 0.0));
    }

    #[test]
    fn test_ragged_grid_rejected() {
        assert!(FaceGrid::new(["ABC", "AB"]).is_err());
        assert!(FaceGrid::new(Vec::<String>::new()).is_err());
        assert!(FaceGrid::new(["A C"]).is_err());
    }

    #[test]
    fn test_parse_skips_comments() {
        let grid = FaceGrid::parse("# demo\nABÜ\n\n  DEF \n").unwrap();
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.row_text(1).as_deref(), Some("DEF"));
    }

    #[test]
    fn test_find_in_row_counts_characters() {
        let grid = FaceGrid::german();
        assert_eq!(grid.find_in_row(0, "FÜNF"), Some(7));
        assert_eq!(grid.find_in_row(4, "ELF"), Some(5));
        assert_eq!(grid.find_in_row(9, "NEUN"), Some(3));
        assert_eq!(grid.find_in_row(9, "UHR"), Some(8));
        assert_eq!(grid.find_in_row(0, "UHR"), None);
        assert_eq!(grid.find_in_row(42, "ES"), None);
    }

    #[test]
    fn test_charset_includes_umlauts() {
        let charset = FaceGrid::german().charset();
        assert!(charset.contains(&'Ü'));
        assert!(charset.contains(&'Ö'));
        assert_eq!(charset[0], 'E');
    }
}
