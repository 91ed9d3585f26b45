//! Confidence post-processor (C4): demotes the confidence of a deleted
//! reference note when a nearby octave or major-third companion is
//! present, since the transcriber empirically confuses those intervals
//! with the note actually played.

use crate::edit::{Edit, EditOperation};

/// Half-width, in seconds, of the neighbor window searched around a
/// deleted note's start time.
pub const OCTAVE_CHECK_SECS: f64 = 0.1;

/// An ascending-time index over a note sequence's `(time, pitch)` pairs,
/// built once and reused across every deleted edit in a scoring pass.
struct TimeIndex {
    times: Vec<f64>,
    pitches: Vec<i32>,
}

impl TimeIndex {
    fn build(times: &[f64], pitches: &[i32]) -> Self {
        let mut order: Vec<usize> = (0..times.len()).collect();
        order.sort_by(|&a, &b| times[a].partial_cmp(&times[b]).unwrap());
        Self {
            times: order.iter().map(|&i| times[i]).collect(),
            pitches: order.iter().map(|&i| pitches[i]).collect(),
        }
    }

    /// Pitches of every note within `[center - OCTAVE_CHECK_SECS, center +
    /// OCTAVE_CHECK_SECS]`, found by binary search on the ascending times.
    fn neighbors(&self, center: f64) -> &[i32] {
        let lo = self
            .times
            .partition_point(|&t| t < center - OCTAVE_CHECK_SECS);
        let hi = self
            .times
            .partition_point(|&t| t <= center + OCTAVE_CHECK_SECS);
        &self.pitches[lo..hi]
    }
}

/// Sets `confidence` on each DELETE edit's `s_char`, leaving every other
/// edit at the default confidence of 5. `times`/`pitches` are the
/// reference arrays produced by [`crate::note::preprocess`].
pub fn adjust_confidence(edits: &mut [Edit], times: &[f64], pitches: &[i32]) {
    let index = TimeIndex::build(times, pitches);

    for edit in edits.iter_mut() {
        let Some(note) = edit.s_char.as_mut() else {
            continue;
        };
        note.confidence = 5;

        if edit.operation != EditOperation::Delete {
            continue;
        }

        let local = index.neighbors(note.start_time);
        let pitch = note.pitch;
        if local.contains(&(pitch + 12)) || local.contains(&(pitch - 12)) {
            note.confidence = 3;
        } else if local.contains(&(pitch + 4)) || local.contains(&(pitch - 4)) {
            note.confidence = 4;
        }
    }
}
