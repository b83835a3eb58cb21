//! Subcommand implementations

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use wordface_core::FaceGrid;

pub mod build;
pub mod info;
pub mod phrase;

/// The grid from `path`, or the built-in German one
pub fn load_grid(path: Option<&Path>) -> Result<FaceGrid> {
    let Some(path) = path else {
        return Ok(FaceGrid::german());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read grid file {}", path.display()))?;
    let grid = FaceGrid::parse(&text)
        .with_context(|| format!("Invalid grid file {}", path.display()))?;
    log::info!(
        "Loaded {}x{} grid from {}",
        grid.rows(),
        grid.columns(),
        path.display()
    );
    Ok(grid)
}
