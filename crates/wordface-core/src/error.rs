//! Error types for Wordface

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WordfaceError>;

/// Main error type for Wordface
#[derive(Debug, Error)]
pub enum WordfaceError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Glyph synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parameter, grid and time configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Parameter table '{primary}' not found (tried: {tried}). Check its internal name.")]
    TableNotFound { primary: String, tried: String },

    #[error("Parameter table '{table}' has no cell '{cell}'")]
    MissingCell { table: String, cell: String },

    #[error("Cell '{table}.{cell}' is not a number: {value:?}")]
    NotANumber {
        table: String,
        cell: String,
        value: String,
    },

    #[error("Invalid spacing: dx={dx}, dy={dy} (must be finite and positive)")]
    InvalidSpacing { dx: f64, dy: f64 },

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid time {0:?}, expected HH:MM within 00:00..23:59")]
    InvalidTime(String),

    #[error("Malformed parameter file: {0}")]
    Parse(String),
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,

    #[error("Font does not cover: {0}")]
    MissingCharacters(String),
}

/// Glyph synthesis errors
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Font has no glyph for {0:?}")]
    MissingGlyph(char),

    #[error("Outline extraction failed for {0:?}")]
    OutlineFailed(char),

    #[error("Invalid glyph size: {0}")]
    InvalidSize(f64),

    #[error("Nothing to synthesize")]
    EmptyText,
}

/// Host document errors
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Unknown object #{0}")]
    UnknownObject(u32),

    #[error("Unknown group #{0}")]
    UnknownGroup(u32),

    #[error("Geometry of '{0}' is out of date, recompute the document first")]
    StaleGeometry(String),
}

/// Face layout errors
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Group '{0}' has no members to center")]
    EmptyGroup(String),

    #[error("Word {word:?} not found in grid row {row}")]
    WordNotFound { word: String, row: usize },
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}
