//! Performance scoring engine.
//!
//! Aligns a transcribed performance (`played`) against a reference score
//! (`reference`) with a tuned edit-distance variant, reports the result as
//! a localized edit script, and segments the aligned timing into
//! piecewise-constant tempo sections.
//!
//! # Pipeline
//!
//! ```text
//! preprocess -> compute_dp -> backtrack -> adjust_confidence -> analyze_tempo
//! ```
//!
//! [`facade::find_ops`] runs the first four stages and returns the edit
//! script plus the aligned index pairs; [`facade::score`] runs the whole
//! pipeline and assembles a [`ScoringResult`]. Most callers want `score`.
//!
//! ```
//! use scoring_core::{score, Note, NoteList, TempoParams};
//!
//! let mut reference = NoteList::new(vec![Note::new(60, 0.0), Note::new(64, 0.5)]);
//! let mut played = NoteList::new(vec![Note::new(60, 0.0), Note::new(64, 0.51)]);
//! let result = score(&mut reference, &mut played, &TempoParams::default()).unwrap();
//! assert!(result.edits.is_empty());
//! ```
//!
//! # Modules
//!
//! - [`note`]: `Note`, `NoteList`, and input validation/preprocessing (C1)
//! - [`align`]: the DP cost table and backtracking aligner (C2, C3)
//! - [`confidence`]: octave/third confusion post-processing (C4)
//! - [`tempo`]: piecewise tempo segmentation (C5)
//! - [`facade`]: the orchestrating entry points (C6)
//! - [`edit`]: edit, tempo-section, and result/recording types
//! - [`wire`]: length-delimited binary codec
//! - [`error`]: closed error enums for the engine and the wire codec
//! - [`instrument`]: timing instrumentation shared by the pipeline stages

pub mod align;
pub mod confidence;
pub mod edit;
pub mod error;
pub mod facade;
pub mod instrument;
pub mod note;
pub mod tempo;
pub mod wire;

pub use edit::{Edit, EditOperation, Recording, ScoringResult, TempoSection, Timestamp};
pub use error::{EngineResult, ScoringError, WireError, WireResult};
pub use facade::{find_ops, score};
pub use note::{BBox, Note, NoteList};
pub use tempo::{analyze_tempo, TempoParams};
