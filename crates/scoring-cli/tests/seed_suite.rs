//! CLI smoke test: runs the `score` subcommand's implementation against
//! the seed-suite fixtures and checks the documented edit counts.

use std::fs;
use std::process::ExitCode;

use pretty_assertions::assert_eq;
use scoring_core::{wire, EditOperation, Note, NoteList, ScoringResult};
use scoring_cli::commands;

fn fixture(dir: &tempfile::TempDir, name: &str, notes: &[(i32, f64)]) -> String {
    let list = NoteList::new(notes.iter().map(|&(p, t)| Note::new(p, t)).collect());
    let mut bytes = Vec::new();
    wire::write_note_list(&mut bytes, &list).unwrap();
    let path = dir.path().join(name);
    fs::write(&path, &bytes).unwrap();
    path.to_str().unwrap().to_string()
}

fn run_and_load(
    dir: &tempfile::TempDir,
    reference: &[(i32, f64)],
    played: &[(i32, f64)],
) -> ScoringResult {
    let reference_path = fixture(dir, "reference.bin", reference);
    let played_path = fixture(dir, "played.bin", played);
    let out_path = dir.path().join("report.json");

    let code = commands::score::run(
        &reference_path,
        &played_path,
        true,
        Some(out_path.to_str().unwrap()),
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap()
}

#[test]
fn exact_match_produces_no_edits() {
    let dir = tempfile::tempdir().unwrap();
    let notes = [(60, 0.0), (62, 0.5), (64, 1.0)];
    let result = run_and_load(&dir, &notes, &notes);
    assert!(result.edits.is_empty());
    assert_eq!(result.unstable_rate, 0.0);
}

#[test]
fn one_substitution_is_reported_at_the_right_position() {
    let dir = tempfile::tempdir().unwrap();
    let reference = [(60, 0.0), (62, 0.5), (64, 1.0)];
    let played = [(60, 0.0), (63, 0.5), (64, 1.0)];
    let result = run_and_load(&dir, &reference, &played);
    assert_eq!(result.edits.len(), 1);
    assert_eq!(result.edits[0].operation, EditOperation::Substitute);
    assert_eq!(result.edits[0].pos, 1);
    assert_eq!(result.edits[0].t_pos, 1);
}

#[test]
fn single_insertion_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let reference = [(60, 0.0), (64, 1.0)];
    let played = [(60, 0.0), (62, 0.5), (64, 1.0)];
    let result = run_and_load(&dir, &reference, &played);
    assert_eq!(result.edits.len(), 1);
    assert_eq!(result.edits[0].operation, EditOperation::Insert);
    assert_eq!(result.edits[0].pos, 1);
    assert_eq!(result.edits[0].t_pos, 1);
}

#[test]
fn move_within_window_reports_no_substitutions() {
    let dir = tempfile::tempdir().unwrap();
    let reference = [(60, 0.0), (62, 0.5), (64, 1.0), (65, 1.5)];
    let played = [(60, 0.0), (64, 0.5), (62, 1.0), (65, 1.5)];
    let result = run_and_load(&dir, &reference, &played);
    assert!(result
        .edits
        .iter()
        .all(|e| e.operation != EditOperation::Substitute));
}

#[test]
fn trailing_trim_reports_no_edits() {
    let dir = tempfile::tempdir().unwrap();
    let reference = [(60, 0.0), (62, 0.5), (64, 1.0), (65, 1.5), (67, 2.0)];
    let played = [(60, 0.0), (62, 0.5), (64, 1.0)];
    let result = run_and_load(&dir, &reference, &played);
    assert!(result.edits.is_empty());
}

#[test]
fn octave_confusion_demotes_the_deleted_note() {
    let dir = tempfile::tempdir().unwrap();
    let reference = [(60, 0.0), (72, 0.02)];
    let played = [(72, 0.0)];
    let result = run_and_load(&dir, &reference, &played);
    assert_eq!(result.edits.len(), 1);
    assert_eq!(result.edits[0].operation, EditOperation::Delete);
    let deleted = result.edits[0].s_char.as_ref().unwrap();
    assert_eq!(deleted.pitch, 60);
    assert_eq!(deleted.confidence, 3);
}

#[test]
fn text_report_is_produced_without_the_json_flag() {
    let dir = tempfile::tempdir().unwrap();
    let reference_path = fixture(&dir, "reference.bin", &[(60, 0.0), (62, 0.5)]);
    let played_path = fixture(&dir, "played.bin", &[(60, 0.0), (62, 0.5)]);
    let out_path = dir.path().join("report.txt");

    let code = commands::score::run(
        &reference_path,
        &played_path,
        false,
        Some(out_path.to_str().unwrap()),
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let report = fs::read_to_string(&out_path).unwrap();
    assert!(report.contains("No wrong notes."));
    assert!(report.contains("Unstable rate"));
}
