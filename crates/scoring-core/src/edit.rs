//! Edit operations, tempo sections, and the aggregate results the facade
//! (C6) returns: `ScoringResult` and `Recording`.

use serde::{Deserialize, Serialize};

use crate::note::Note;

/// The three kinds of localized performance error the engine reports.
/// Discriminant values are normative (§6): INSERT=0, SUBSTITUTE=1, DELETE=2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum EditOperation {
    /// A note the performer played that has no counterpart in the reference.
    Insert = 0,
    /// A reference note played at the wrong pitch.
    Substitute = 1,
    /// A reference note the performer never played.
    Delete = 2,
}

impl EditOperation {
    /// Round-trips the normative wire tag back into a variant.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(EditOperation::Insert),
            1 => Some(EditOperation::Substitute),
            2 => Some(EditOperation::Delete),
            _ => None,
        }
    }

    /// The normative wire tag for this variant.
    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// A single localized edit at a reference position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edit {
    /// Which kind of edit this is.
    pub operation: EditOperation,
    /// Index into the reference sequence this edit applies at.
    pub pos: usize,
    /// Index into the played sequence this edit applies at.
    pub t_pos: usize,
    /// Snapshot of the reference note, present for SUBSTITUTE/DELETE. For
    /// INSERT this is advisory only (see DESIGN.md Open Question b) — when
    /// present it records a nearby reference note purely for display
    /// context, never a structural guarantee; `None` when the reference is
    /// exhausted (leading inserts before the first reference note).
    pub s_char: Option<Note>,
    /// Snapshot of the played note, present for SUBSTITUTE/INSERT.
    pub t_char: Option<Note>,
}

/// A contiguous range of aligned reference indices treated as having a
/// single, constant local tempo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempoSection {
    /// First reference index covered by this section (inclusive).
    pub start_index: usize,
    /// Last reference index covered by this section (inclusive, per
    /// Invariant 4: `prev.end_index == next.start_index`, i.e. boundaries
    /// are shared rather than adjacent-exclusive).
    pub end_index: usize,
    /// Mean slope of the smoothed timing residual over this section.
    pub tempo: f64,
}

/// Everything the scoring facade (C6) produces for one reference/played
/// pair: the edit script, the page sizes carried through from the
/// reference `NoteList`, and the tempo analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Edits in order of increasing `pos` (Invariant 2).
    pub edits: Vec<Edit>,
    /// Page dimensions carried over from the reference note list.
    pub size: Vec<(f32, f32)>,
    /// Scalar summarizing how much local tempo varies over the performance.
    pub unstable_rate: f64,
    /// Piecewise-constant tempo partition of the aligned range.
    pub tempo_sections: Vec<TempoSection>,
}

/// Seconds since the Unix epoch. A minimal stand-in for whatever instant
/// type the storage layer uses; the core only ever stamps and carries it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

/// Top-level artifact combining a played performance with its computed
/// edits. Assembled by the caller after scoring; never mutated once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// The transcribed performance that was scored.
    pub played_notes: crate::note::NoteList,
    /// The result of scoring `played_notes` against some reference.
    pub computed_edits: ScoringResult,
    /// When this recording was scored.
    pub created_at: Timestamp,
}
