//! Phrase command implementation
//!
//! Needs no font: words are looked up on the grid only.

use anyhow::Result;
use wordface_core::Phrase;

use super::load_grid;
use crate::cli::PhraseArgs;

pub fn run(args: &PhraseArgs) -> Result<()> {
    let grid = load_grid(args.grid_file.as_deref())?;
    let phrase = Phrase::parse(&args.time)?;

    println!("{}", phrase);
    for word in &phrase.words {
        let labels: Vec<String> = word.cells(&grid)?.iter().map(|cell| cell.label()).collect();
        println!("  {:<8} {}", word.text(), labels.join(" "));
    }
    println!("Minute dots: {}", phrase.minute_dots);

    Ok(())
}
