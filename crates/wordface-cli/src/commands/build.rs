//! Build command implementation
//!
//! Parameters, font, layout, optional time phrase, export.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use wordface_core::{
    plate::PLATE_SIDE, traits::Exporter, Color, Document, FaceLayout, FrontPlate, ObjectId,
    ParameterStore, Phrase,
};
use wordface_export::{lit_objects, JsonExporter, SvgExporter};
use wordface_fontdb::{default_font_path, Font, OutlineSynthesizer};

use super::load_grid;
use crate::cli::{BuildArgs, OutputFormat};

pub fn run(args: &BuildArgs) -> Result<()> {
    if !args.quiet {
        let cwd = std::env::current_dir().context("Failed to read working directory")?;
        eprintln!("Working directory: {}", cwd.display());
    }

    // 1. Parameters, grid and time; a bad one stops us before any glyph exists
    let store = ParameterStore::from_file(&args.params)
        .with_context(|| format!("Failed to read parameters from {}", args.params.display()))?;
    let table = store.parameters()?;
    let grid = load_grid(args.grid_file.as_deref())?;
    let phrase = args.time.as_deref().map(Phrase::parse).transpose()?;

    let plate = match args.plate {
        Some(side) => Some(side),
        None => table.optional_number(PLATE_SIDE)?,
    }
    .map(FrontPlate::new);

    let mut layout = FaceLayout::from_table(&table, grid.clone())?
        .with_font_size(args.font_size);
    if let Some(plate) = plate {
        layout = layout.with_plate(plate);
    }

    // 2. Font
    let font_path = args
        .font_file
        .clone()
        .unwrap_or_else(|| default_font_path(parameter_dir(&args.params)));
    let font = Font::from_file(&font_path)
        .with_context(|| format!("Failed to load font {}", font_path.display()))?;
    font.ensure_covers(&grid.charset())?;

    // 3. Layout
    let mut document = Document::new(Arc::new(OutlineSynthesizer::new()));
    let face = layout.build(&mut document, Arc::new(font))?;
    log::debug!(
        "Document: {} objects after {} recompute(s)",
        document.object_count(),
        document.recompute_count()
    );

    // 4. Phrase
    let lit = match &phrase {
        Some(phrase) => {
            log::info!("{:02}:{:02} -> {}", phrase.hour, phrase.minute, phrase);
            Some(lit_objects(&face, &phrase.cells(&grid)?))
        },
        None => None,
    };

    // 5. Export
    let exporter = create_exporter(args, plate, lit)?;
    let exported = exporter.export(&document, &face)?;
    write_output(args.output_file.as_deref(), &exported)?;

    if !args.quiet {
        match &args.output_file {
            Some(path) => eprintln!("Wrote {} glyphs to {}", face.glyphs.len(), path.display()),
            None => eprintln!("Wrote {} glyphs to stdout", face.glyphs.len()),
        }
        eprintln!("  Format: {}", args.format.as_str().to_uppercase());
        eprintln!("  Size: {} bytes", exported.len());
        eprintln!("Done!");
    }

    Ok(())
}

/// Directory the default font path is resolved against
fn parameter_dir(params: &Path) -> PathBuf {
    params
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn create_exporter(
    args: &BuildArgs,
    plate: Option<FrontPlate>,
    lit: Option<HashSet<ObjectId>>,
) -> Result<Box<dyn Exporter>> {
    match args.format {
        OutputFormat::Svg => {
            let foreground = Color::parse_hex(&args.foreground).ok_or_else(|| {
                anyhow!(
                    "Invalid color '{}', expected RRGGBB or RRGGBBAA",
                    args.foreground
                )
            })?;
            let mut exporter = SvgExporter::new().with_foreground(foreground);
            if let Some(plate) = plate {
                exporter = exporter.with_plate(plate);
            }
            if let Some(lit) = lit {
                exporter = exporter.with_lit(lit);
            }
            Ok(Box::new(exporter))
        },
        OutputFormat::Json => {
            let mut exporter = JsonExporter::with_pretty_print().with_wiring(args.wiring.into());
            if let Some(lit) = lit {
                exporter = exporter.with_lit(lit);
            }
            Ok(Box::new(exporter))
        },
    }
}

fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            file.write_all(data)?;
        },
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
        },
    }
    Ok(())
}
