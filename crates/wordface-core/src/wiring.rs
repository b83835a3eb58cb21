//! How the LED strip behind the face is threaded through the cells
//!
//! ```text
//! Linear 3x2:        Serpentine 3x2:
//!   LED0 LED1 LED2     LED0 LED1 LED2
//!   LED3 LED4 LED5     LED5 LED4 LED3
//! ```

/// Strip order across the grid, starting at the top-left cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wiring {
    /// Every row runs left to right
    Linear,
    /// Even rows run left to right, odd rows right to left
    #[default]
    Serpentine,
}

impl Wiring {
    /// Position on the strip of the LED behind `(row, column)`
    pub fn led_index(self, row: usize, column: usize, columns: usize) -> usize {
        let offset = match self {
            Wiring::Linear => column,
            Wiring::Serpentine if row % 2 == 1 => columns - 1 - column,
            Wiring::Serpentine => column,
        };
        row * columns + offset
    }

    /// `(row, column)` for every LED in strip order
    pub fn order(self, rows: usize, columns: usize) -> Vec<(usize, usize)> {
        let mut order = vec![(0, 0); rows * columns];
        for row in 0..rows {
            for column in 0..columns {
                order[self.led_index(row, column, columns)] = (row, column);
            }
        }
        order
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Wiring::Linear => "linear",
            Wiring::Serpentine => "serpentine",
        }
    }
}
