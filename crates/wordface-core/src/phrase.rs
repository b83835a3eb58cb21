//! German time phrases and the cells that light them
//!
//! The clock reads in five-minute steps: "ES IST FÜNF VOR HALB ELF" for
//! 10:25. The leftover minutes (0-4) show as corner dots.

use std::fmt;

use crate::{
    error::{ConfigError, LayoutError, Result},
    grid::{Cell, FaceGrid},
};

const HOURS: [&str; 12] = [
    "EINS", "ZWEI", "DREI", "VIER", "FÜNF", "SECHS", "SIEBEN", "ACHT", "NEUN", "ZEHN", "ELF",
    "ZWÖLF",
];

/// Grid row holding each hour word on the German face
const HOUR_ROWS: [usize; 12] = [5, 5, 6, 6, 4, 7, 8, 7, 9, 9, 4, 8];

/// A word the clock can light
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Word {
    Es,
    Ist,
    /// "FÜNF" in the minutes line
    FuenfMinutes,
    /// "ZEHN" in the minutes line
    ZehnMinutes,
    Zwanzig,
    /// "DREI" as in "DREI VIERTEL"
    DreiQuarter,
    Viertel,
    Vor,
    Nach,
    Halb,
    Uhr,
    /// "EIN" as in "EIN UHR"
    Ein,
    /// Hour 1-12
    Hour(u8),
}

impl Word {
    fn hour_slot(hour: u8) -> usize {
        (hour as usize + 11) % 12
    }

    pub fn text(self) -> &'static str {
        match self {
            Word::Es => "ES",
            Word::Ist => "IST",
            Word::FuenfMinutes => "FÜNF",
            Word::ZehnMinutes => "ZEHN",
            Word::Zwanzig => "ZWANZIG",
            Word::DreiQuarter => "DREI",
            Word::Viertel => "VIERTEL",
            Word::Vor => "VOR",
            Word::Nach => "NACH",
            Word::Halb => "HALB",
            Word::Uhr => "UHR",
            Word::Ein => "EIN",
            Word::Hour(hour) => HOURS[Self::hour_slot(hour)],
        }
    }

    /// Row the word is looked up in
    pub fn row(self) -> usize {
        match self {
            Word::Es | Word::Ist | Word::FuenfMinutes => 0,
            Word::ZehnMinutes | Word::Zwanzig => 1,
            Word::DreiQuarter | Word::Viertel => 2,
            Word::Vor | Word::Nach => 3,
            Word::Halb => 4,
            Word::Ein => 5,
            Word::Uhr => 9,
            Word::Hour(hour) => HOUR_ROWS[Self::hour_slot(hour)],
        }
    }

    /// Cells spelling this word on `grid`
    pub fn cells(self, grid: &FaceGrid) -> Result<Vec<Cell>> {
        let text = self.text();
        let row = self.row();
        let start = grid
            .find_in_row(row, text)
            .ok_or_else(|| LayoutError::WordNotFound {
                word: text.to_string(),
                row,
            })?;

        Ok((start..start + text.chars().count())
            .filter_map(|column| grid.cell(row, column))
            .collect())
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// The words lit for one time of day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    pub hour: u8,
    pub minute: u8,
    pub words: Vec<Word>,
    /// Minutes past the last five-minute step
    pub minute_dots: u8,
}

impl Phrase {
    /// Phrase for a 24-hour time
    pub fn at(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(ConfigError::InvalidTime(format!("{:02}:{:02}", hour, minute)).into());
        }

        let minute_dots = minute % 5;
        let step = minute - minute_dots;

        let current = match hour % 12 {
            0 => 12,
            h => h,
        };
        let next = current % 12 + 1;

        let mut words = vec![Word::Es, Word::Ist];
        match step {
            0 => {
                // "EIN UHR", never "EINS UHR"
                words.push(if current == 1 { Word::Ein } else { Word::Hour(current) });
                words.push(Word::Uhr);
            },
            5 => words.extend([Word::FuenfMinutes, Word::Nach, Word::Hour(current)]),
            10 => words.extend([Word::ZehnMinutes, Word::Nach, Word::Hour(current)]),
            15 => words.extend([Word::Viertel, Word::Hour(next)]),
            20 => words.extend([Word::Zwanzig, Word::Nach, Word::Hour(current)]),
            25 => words.extend([Word::FuenfMinutes, Word::Vor, Word::Halb, Word::Hour(next)]),
            30 => words.extend([Word::Halb, Word::Hour(next)]),
            35 => words.extend([Word::FuenfMinutes, Word::Nach, Word::Halb, Word::Hour(next)]),
            40 => words.extend([Word::Zwanzig, Word::Vor, Word::Hour(next)]),
            45 => words.extend([Word::DreiQuarter, Word::Viertel, Word::Hour(next)]),
            50 => words.extend([Word::ZehnMinutes, Word::Vor, Word::Hour(next)]),
            _ => words.extend([Word::FuenfMinutes, Word::Vor, Word::Hour(next)]),
        }

        Ok(Self {
            hour,
            minute,
            words,
            minute_dots,
        })
    }

    /// Parse `HH:MM` and build its phrase
    pub fn parse(time: &str) -> Result<Self> {
        let (hour, minute) = parse_clock_time(time)?;
        Self::at(hour, minute)
    }

    /// Every lit cell, word by word
    pub fn cells(&self, grid: &FaceGrid) -> Result<Vec<Cell>> {
        let mut cells = Vec::new();
        for word in &self.words {
            cells.extend(word.cells(grid)?);
        }
        Ok(cells)
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for word in &self.words {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(word.text())?;
            first = false;
        }
        Ok(())
    }
}

/// Parse a `HH:MM` time of day
pub fn parse_clock_time(time: &str) -> Result<(u8, u8)> {
    let invalid = || ConfigError::InvalidTime(time.to_string());
    let (hour, minute) = time.trim().split_once(':').ok_or_else(invalid)?;
    let hour: u8 = hour.parse().map_err(|_| invalid())?;
    let minute: u8 = minute.parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid().into());
    }
    Ok((hour, minute))
}
