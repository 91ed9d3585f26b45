//! `score` command: aligns a played performance against a reference and
//! reports the edit script and tempo analysis.

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use scoring_core::{score, EditOperation, NoteList, ScoringResult, TempoParams};

fn read_note_list(path: &str) -> Result<NoteList> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {path}"))?;
    scoring_core::wire::read_note_list(&mut bytes.as_slice())
        .with_context(|| format!("failed to decode note list from {path}"))
}

/// Runs the `score` subcommand: reads `reference_path`/`played_path`,
/// scores the performance, and writes the report to `output_path` (or
/// stdout) as JSON or text.
pub fn run(
    reference_path: &str,
    played_path: &str,
    json: bool,
    output_path: Option<&str>,
) -> Result<ExitCode> {
    let mut reference = read_note_list(reference_path)?;
    let mut played = read_note_list(played_path)?;

    let result = score(&mut reference, &mut played, &TempoParams::default())
        .context("scoring failed")?;

    let report = if json {
        serde_json::to_string_pretty(&result).context("failed to serialize report as JSON")?
    } else {
        render_text_report(&result)
    };

    match output_path {
        Some(path) => {
            fs::write(path, &report).with_context(|| format!("failed to write {path}"))?;
            println!("{} {}", "Report written to:".dimmed(), path);
        }
        None => println!("{report}"),
    }

    Ok(ExitCode::SUCCESS)
}

/// Renders a human-readable report: one line per costed edit (matches are
/// never reported since they carry no edit), followed by the tempo
/// summary. Mirrors the shape of the original implementation's
/// `print_wrong_notes` debug harness.
fn render_text_report(result: &ScoringResult) -> String {
    let mut lines = Vec::new();

    if result.edits.is_empty() {
        lines.push(format!("{}", "No wrong notes.".green().bold()));
    } else {
        lines.push(format!(
            "{} ({} total)",
            "Wrong notes:".red().bold(),
            result.edits.len()
        ));
        for edit in &result.edits {
            let (label, color) = match edit.operation {
                EditOperation::Insert => ("INSERT", "yellow"),
                EditOperation::Substitute => ("SUBST", "red"),
                EditOperation::Delete => ("DELETE", "red"),
            };
            let label = if color == "red" {
                label.red()
            } else {
                label.yellow()
            };

            let expected = edit
                .s_char
                .as_ref()
                .map(|n| n.pitch.to_string())
                .unwrap_or_else(|| "-".to_string());
            let played = edit
                .t_char
                .as_ref()
                .map(|n| n.pitch.to_string())
                .unwrap_or_else(|| "-".to_string());
            let confidence = edit.s_char.as_ref().map(|n| n.confidence).unwrap_or(5);

            lines.push(format!(
                "  {} pos={} t_pos={} expected={} played={} confidence={}",
                label, edit.pos, edit.t_pos, expected, played, confidence
            ));
        }
    }

    lines.push(format!(
        "\n{} {:.4}",
        "Unstable rate:".cyan().bold(),
        result.unstable_rate
    ));
    lines.push(format!(
        "{} {} section(s)",
        "Tempo:".cyan().bold(),
        result.tempo_sections.len()
    ));
    for section in &result.tempo_sections {
        lines.push(format!(
            "  [{}..{}) tempo={:.4}",
            section.start_index, section.end_index, section.tempo
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scoring_core::{wire, Note};

    fn write_note_list(dir: &tempfile::TempDir, name: &str, notes: &[(i32, f64)]) -> String {
        let list = NoteList::new(notes.iter().map(|&(p, t)| Note::new(p, t)).collect());
        let mut bytes = Vec::new();
        wire::write_note_list(&mut bytes, &list).unwrap();
        let path = dir.path().join(name);
        fs::write(&path, &bytes).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn scores_two_wire_files_and_writes_json_report() {
        let dir = tempfile::tempdir().unwrap();
        let reference_path = write_note_list(&dir, "ref.bin", &[(60, 0.0), (62, 0.5), (64, 1.0)]);
        let played_path = write_note_list(&dir, "played.bin", &[(60, 0.0), (63, 0.5), (64, 1.0)]);
        let out_path = dir.path().join("report.json");

        let code = run(
            &reference_path,
            &played_path,
            true,
            Some(out_path.to_str().unwrap()),
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let report: ScoringResult =
            serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(report.edits.len(), 1);
        assert_eq!(report.edits[0].operation, EditOperation::Substitute);
    }

    #[test]
    fn clean_performance_reports_no_wrong_notes_in_text_mode() {
        let dir = tempfile::tempdir().unwrap();
        let reference_path = write_note_list(&dir, "ref.bin", &[(60, 0.0), (62, 0.5)]);
        let played_path = write_note_list(&dir, "played.bin", &[(60, 0.0), (62, 0.5)]);

        let mut reference = read_note_list(&reference_path).unwrap();
        let mut played = read_note_list(&played_path).unwrap();
        let result = score(&mut reference, &mut played, &TempoParams::default()).unwrap();
        let report = render_text_report(&result);
        assert!(report.contains("No wrong notes."));
    }
}
