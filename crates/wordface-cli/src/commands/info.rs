//! Info command implementation

use anyhow::Result;
use wordface_core::{layout::GROUP_NAME, LED_SPACING, PARAMETER_TABLE_NAMES};

use super::load_grid;
use crate::cli::InfoArgs;

pub fn run(args: &InfoArgs) -> Result<()> {
    let show_all = !args.grid && !args.tables && !args.formats;

    println!("Wordface v{}", env!("CARGO_PKG_VERSION"));
    println!();

    if show_all || args.grid {
        let grid = load_grid(args.grid_file.as_deref())?;
        println!("Grid ({}x{}, group '{}'):", grid.rows(), grid.columns(), GROUP_NAME);
        for row in 0..grid.rows() {
            println!("  {}", grid.row_text(row).unwrap_or_default());
        }
        if show_all {
            println!();
        }
    }

    if show_all || args.tables {
        println!("Parameter tables (first match wins):");
        for name in PARAMETER_TABLE_NAMES {
            println!("  {}", name);
        }
        println!("Required cell: {}", LED_SPACING);
        if show_all {
            println!();
        }
    }

    if show_all || args.formats {
        println!("Output Formats:");
        println!("  svg               - Letter outlines in millimetres");
        println!("  json              - Placement, bounds and LED index per letter");
    }

    Ok(())
}
