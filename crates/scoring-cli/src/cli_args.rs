//! CLI argument definitions for the scoring command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined
//! here, keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// note-scoring - Performance-vs-score alignment and tempo analysis
#[derive(Parser)]
#[command(name = "scoring-cli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Score a played performance against a reference, reporting edits and tempo
    Score {
        /// Path to the reference (score) note list, in wire format
        #[arg(short, long)]
        reference: String,

        /// Path to the played (performance) note list, in wire format
        #[arg(short, long)]
        played: String,

        /// Output machine-readable JSON instead of a text report
        #[arg(long)]
        json: bool,

        /// Write the report to this path instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Re-encode a note list file, verifying it round-trips through the wire codec
    Inspect {
        /// Path to a wire-format note list
        #[arg(short, long)]
        input: String,
    },
}
