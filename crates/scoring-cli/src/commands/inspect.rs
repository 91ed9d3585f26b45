//! `inspect` command: loads a wire-format note list and prints a summary,
//! verifying the file round-trips through the codec cleanly.

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use scoring_core::wire;

/// Runs the `inspect` subcommand against `input_path`.
pub fn run(input_path: &str) -> Result<ExitCode> {
    let bytes = fs::read(input_path).with_context(|| format!("failed to read {input_path}"))?;
    let list = wire::read_note_list(&mut bytes.as_slice())
        .with_context(|| format!("failed to decode note list from {input_path}"))?;

    let mut round_tripped = Vec::new();
    wire::write_note_list(&mut round_tripped, &list)
        .context("failed to re-encode note list")?;

    println!(
        "{} {} note(s), {} page size(s)",
        "Loaded:".cyan().bold(),
        list.len(),
        list.size.len()
    );
    if round_tripped == bytes {
        println!("{}", "Round-trip: OK".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} re-encoded length {} differs from input length {}",
            "Round-trip: MISMATCH".red().bold(),
            round_tripped.len(),
            bytes.len()
        );
        Ok(ExitCode::from(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scoring_core::{Note, NoteList};

    #[test]
    fn inspect_reports_success_for_a_well_formed_file() {
        let dir = tempfile::tempdir().unwrap();
        let list = NoteList::new(vec![Note::new(60, 0.0), Note::new(64, 1.0)]);
        let mut bytes = Vec::new();
        wire::write_note_list(&mut bytes, &list).unwrap();
        let path = dir.path().join("notes.bin");
        fs::write(&path, &bytes).unwrap();

        let code = run(path.to_str().unwrap()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn inspect_fails_to_decode_garbage_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.bin");
        fs::write(&path, [0xFFu8; 3]).unwrap();

        assert!(run(path.to_str().unwrap()).is_err());
    }
}
