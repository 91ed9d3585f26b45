//! Scoring facade (C6): the single entry point orchestrating C1-C5.

use crate::align::{backtrack, compute_dp};
use crate::confidence::adjust_confidence;
use crate::edit::{Edit, ScoringResult};
use crate::error::EngineResult;
use crate::instrument::time_block;
use crate::note::{preprocess, NoteList};
use crate::tempo::{analyze_tempo, TempoParams};

/// Computes the edit script and aligned pairs for `played` against
/// `reference`.
///
/// Mutates both `NoteList`s in place (sorts them and rewrites `id`) as
/// documented in §5 — callers that need to preserve original order must
/// copy beforehand. Tempo analysis is not performed here; call
/// [`score`] for the combined result, or [`crate::tempo::analyze_tempo`]
/// directly with the aligned pairs this function returns.
pub fn find_ops(
    reference: &mut NoteList,
    played: &mut NoteList,
) -> EngineResult<(Vec<Edit>, Vec<(usize, usize)>)> {
    let (ref_arrays, played_arrays) =
        time_block("preprocess", || preprocess(reference, played))?;

    let table = time_block("compute_dp", || {
        compute_dp(&ref_arrays.pitches, &played_arrays.pitches)
    });

    let (mut edits, aligned) = time_block("backtrack", || {
        backtrack(&table, &reference.notes, &played.notes)
    })?;

    time_block("adjust_confidence", || {
        adjust_confidence(&mut edits, &ref_arrays.times, &ref_arrays.pitches);
    });

    log::info!(
        "scored {} edits over {} aligned pairs",
        edits.len(),
        aligned.len()
    );

    Ok((edits, aligned))
}

/// Runs [`find_ops`] followed by [`analyze_tempo`] and assembles the
/// combined [`ScoringResult`], the shape callers typically want.
pub fn score(
    reference: &mut NoteList,
    played: &mut NoteList,
    params: &TempoParams,
) -> EngineResult<ScoringResult> {
    let size = reference.size.clone();

    let (edits, aligned) = find_ops(reference, played)?;

    // `reference`/`played` are sorted in place by `find_ops`; read times
    // afterward so the aligned pairs index the same order.
    let ref_times: Vec<f64> = reference.notes.iter().map(|n| n.start_time).collect();
    let played_times: Vec<f64> = played.notes.iter().map(|n| n.start_time).collect();

    let (tempo_sections, unstable_rate) =
        analyze_tempo(&ref_times, &played_times, &aligned, params);

    Ok(ScoringResult {
        edits,
        size,
        unstable_rate,
        tempo_sections,
    })
}
