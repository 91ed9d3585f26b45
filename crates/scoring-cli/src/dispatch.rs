//! Subcommand dispatch: matches a parsed `Commands` onto its `commands::*`
//! implementation.

use std::process::ExitCode;

use anyhow::Result;
use scoring_cli::commands;

use crate::cli_args::Commands;

pub(crate) fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Score {
            reference,
            played,
            json,
            output,
        } => commands::score::run(&reference, &played, json, output.as_deref()),
        Commands::Inspect { input } => commands::inspect::run(&input),
    }
}
