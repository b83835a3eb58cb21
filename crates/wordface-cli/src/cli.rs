//! CLI argument definitions using Clap v4

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use wordface_core::{layout::DEFAULT_FONT_SIZE, Wiring};

/// Wordface - Word-clock faces from a character grid
#[derive(Parser, Debug)]
#[command(name = "wordface")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display the grid, parameter tables and output formats
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Lay out every letter of the face and export it
    #[command(alias = "b")]
    Build(Box<BuildArgs>),

    /// Show which words and cells a time lights
    #[command(alias = "p")]
    Phrase(PhraseArgs),
}

impl Commands {
    /// `(verbose, quiet)` for logger setup
    pub fn verbosity(&self) -> (bool, bool) {
        match self {
            Commands::Info(_) => (false, false),
            Commands::Build(args) => (args.verbose, args.quiet),
            Commands::Phrase(args) => (args.verbose, false),
        }
    }
}

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Print the character grid (the built-in one unless --grid-file is given)
    #[arg(long)]
    pub grid: bool,

    /// List the parameter table names that are tried
    #[arg(long)]
    pub tables: bool,

    /// List available output formats
    #[arg(long)]
    pub formats: bool,

    /// Grid file with one row per line
    #[arg(long = "grid-file")]
    pub grid_file: Option<PathBuf>,
}

/// Arguments for the build command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// JSON file of parameter tables, e.g. {"Parameters": {"led_spacing": 16.6}}
    #[arg(long = "params")]
    pub params: PathBuf,

    /// Font file (default: fonts/Oxanium/static/Oxanium-Regular.ttf next to the parameters)
    #[arg(short = 'f', long = "font-file")]
    pub font_file: Option<PathBuf>,

    /// Glyph size in millimetres
    #[arg(short = 's', long = "font-size", default_value_t = DEFAULT_FONT_SIZE)]
    pub font_size: f64,

    /// Grid file with one row per line (default: the German layout)
    #[arg(long = "grid-file")]
    pub grid_file: Option<PathBuf>,

    /// Light the words for this time (HH:MM)
    #[arg(short = 't', long = "time")]
    pub time: Option<String>,

    /// Front plate side length in millimetres
    #[arg(long = "plate")]
    pub plate: Option<f64>,

    /// LED strip order recorded in JSON output
    #[arg(long = "wiring", default_value = "serpentine")]
    pub wiring: WiringArg,

    /// Lit letter color (RRGGBB or RRGGBBAA)
    #[arg(short = 'c', long = "foreground", default_value = "000000FF")]
    pub foreground: String,

    /// Output file path (stdout if omitted)
    #[arg(short = 'o', long = "output-file")]
    pub output_file: Option<PathBuf>,

    /// Output format
    #[arg(short = 'O', long = "format", default_value = "svg")]
    pub format: OutputFormat,

    /// Silent mode (no progress info)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Verbose output
    #[arg(long = "verbose")]
    pub verbose: bool,
}

/// Arguments for the phrase command
#[derive(Parser, Debug)]
pub struct PhraseArgs {
    /// Time of day (HH:MM)
    #[arg(short = 't', long = "time")]
    pub time: String,

    /// Grid file with one row per line (default: the German layout)
    #[arg(long = "grid-file")]
    pub grid_file: Option<PathBuf>,

    /// Verbose output
    #[arg(long = "verbose")]
    pub verbose: bool,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// SVG paths in millimetres
    Svg,
    /// Placement records per letter
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Json => "json",
        }
    }
}

/// LED strip order
#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum WiringArg {
    /// Every row left to right
    Linear,
    /// Alternate rows reversed
    Serpentine,
}

impl From<WiringArg> for Wiring {
    fn from(arg: WiringArg) -> Self {
        match arg {
            WiringArg::Linear => Wiring::Linear,
            WiringArg::Serpentine => Wiring::Serpentine,
        }
    }
}
