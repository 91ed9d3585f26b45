//! Note model: the entities scored by the alignment engine, plus the
//! canonical sort key used to bring both the reference and played
//! sequences into a comparable order before the DP runs.

use serde::{Deserialize, Serialize};

use crate::error::{EngineResult, ScoringError};

/// Width the time component of the sort key is rounded to before
/// comparison, so that near-simultaneous notes (e.g. a chord written a few
/// milliseconds apart by different voices) sort by pitch rather than by
/// transcription jitter.
pub const TIME_QUANTUM: f64 = 0.1;

/// A rectangle in page-local coordinates locating a note on a rendered
/// score page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

/// A single transcribed or reference musical note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// MIDI pitch, 0-127.
    pub pitch: i32,
    /// Seconds from the start of the piece.
    pub start_time: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// MIDI velocity, 0-127. Defaults to 0 when not supplied by the source.
    pub velocity: i32,
    /// 0-based page index, for reference notes mapped to a rendered score.
    pub page: i32,
    /// Voice/clef index: 0 = treble, 1 = bass, other = misc.
    pub track: i32,
    /// Bounding box on the rendered page, if known.
    pub bbox: Option<BBox>,
    /// Confidence 1-5, written by the confidence post-processor. Starts at 5.
    pub confidence: i32,
    /// Dense index within the owning, sorted list. Rewritten on every sort.
    pub id: i32,
}

impl Note {
    /// Builds a note with the given pitch and start time and every other
    /// field at its documented default. Convenient for tests and for
    /// callers that don't track velocity/page/track/bbox.
    pub fn new(pitch: i32, start_time: f64) -> Self {
        Self {
            pitch,
            start_time,
            duration: 0.0,
            velocity: 0,
            page: 0,
            track: 0,
            bbox: None,
            confidence: 5,
            id: 0,
        }
    }

    fn validate(&self) -> EngineResult<()> {
        if !(0..=127).contains(&self.pitch) {
            return Err(ScoringError::MalformedInput {
                reason: format!("pitch {} outside 0-127", self.pitch),
            });
        }
        if !self.start_time.is_finite() || self.start_time < 0.0 {
            return Err(ScoringError::MalformedInput {
                reason: format!("negative or non-finite start_time {}", self.start_time),
            });
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ScoringError::MalformedInput {
                reason: format!("negative or non-finite duration {}", self.duration),
            });
        }
        Ok(())
    }

    /// The `(page, quantized_time, pitch)` tuple both lists are sorted by.
    /// Comparisons on the quantized time use total ordering over `f64`,
    /// which is safe here because NaN/infinite times are rejected by
    /// [`Note::validate`] before sorting ever runs.
    fn sort_key(&self) -> (i32, f64, i32) {
        let quantized = (self.start_time / TIME_QUANTUM).round() * TIME_QUANTUM;
        (self.page, quantized, self.pitch)
    }
}

/// An ordered sequence of notes plus the page dimensions they were laid
/// out on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteList {
    /// The notes themselves.
    pub notes: Vec<Note>,
    /// `(page_width, page_height)` per page.
    pub size: Vec<(f32, f32)>,
}

impl NoteList {
    /// Builds a note list with no page-size metadata.
    pub fn new(notes: Vec<Note>) -> Self {
        Self {
            notes,
            size: Vec::new(),
        }
    }

    /// Number of notes.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// True if there are no notes.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Sorts `notes` in place by the canonical `(page, quantized_time, pitch)`
/// key and rewrites each note's `id` to its index in the sorted order.
/// Returns an error on the first note that violates the data model.
fn sort_and_reindex(notes: &mut [Note]) -> EngineResult<()> {
    for note in notes.iter() {
        note.validate()?;
    }
    notes.sort_by(|a, b| {
        a.sort_key()
            .partial_cmp(&b.sort_key())
            .expect("sort keys are finite: validated by Note::validate")
    });
    for (i, note) in notes.iter_mut().enumerate() {
        note.id = i as i32;
    }
    Ok(())
}

/// Dense numeric arrays extracted from a sorted note list, the inputs the
/// DP kernel and tempo analyzer actually operate on.
pub struct NoteArrays {
    /// Pitches in sorted order.
    pub pitches: Vec<i32>,
    /// Start times in sorted order.
    pub times: Vec<f64>,
}

fn extract(notes: &[Note]) -> NoteArrays {
    NoteArrays {
        pitches: notes.iter().map(|n| n.pitch).collect(),
        times: notes.iter().map(|n| n.start_time).collect(),
    }
}

/// Sorts both `reference` and `played` in place, reassigns their `id`
/// fields, and returns the dense pitch/time arrays the DP and tempo stages
/// consume. Rejects inputs whose combined size exceeds the documented
/// bound before doing any of that work.
pub fn preprocess(
    reference: &mut NoteList,
    played: &mut NoteList,
) -> EngineResult<(NoteArrays, NoteArrays)> {
    let total = reference.len() + played.len();
    if total > 10_000 {
        return Err(ScoringError::InputTooLarge { total });
    }

    sort_and_reindex(&mut reference.notes)?;
    sort_and_reindex(&mut played.notes)?;

    Ok((extract(&reference.notes), extract(&played.notes)))
}
