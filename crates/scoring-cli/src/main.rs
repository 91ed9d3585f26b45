//! scoring-cli - command-line front end for the note-scoring engine.
//!
//! Reads reference and played note lists in the engine's wire format,
//! scores one against the other, and prints an edit/tempo report.

mod cli_args;
mod dispatch;

use clap::Parser;
use std::process::ExitCode;

use cli_args::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match dispatch::run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:?}");
            ExitCode::from(1)
        }
    }
}
