//! Wordface CLI - lay out word-clock faces from the command line

mod cli;
mod commands;

use clap::Parser;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (verbose, quiet) = cli.command.verbosity();
    let default_filter = match (verbose, quiet) {
        (true, _) => "debug",
        (false, true) => "error",
        (false, false) => "warn",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    match cli.command {
        Commands::Info(args) => commands::info::run(&args),
        Commands::Build(args) => commands::build::run(&args),
        Commands::Phrase(args) => commands::phrase::run(&args),
    }
}
