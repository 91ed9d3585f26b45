//! Error types for alignment and wire-codec failures.

use thiserror::Error;

/// Result type for scoring operations.
pub type EngineResult<T> = Result<T, ScoringError>;

/// Errors that can occur while scoring a performance against a reference.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScoringError {
    /// `|reference| + |played| > 10_000`; the DP table would exceed the
    /// documented memory/time budget.
    #[error("input too large: reference + played = {total} notes (limit 10000)")]
    InputTooLarge {
        /// Combined length of the reference and played note lists.
        total: usize,
    },

    /// A reference or played note violates the data model (negative time,
    /// negative duration, or a pitch outside 0-127).
    #[error("malformed input: {reason}")]
    MalformedInput {
        /// Human-readable description of the violated constraint.
        reason: String,
    },

    /// The backtracker reached a `dp[i][j]` cell whose cost matches none of
    /// the six recorded predecessors. This is a bug in the DP recurrence or
    /// backtrack, never an expected outcome of real input.
    #[error("alignment stuck at dp[{i}][{j}]: no predecessor operation matched its cost")]
    AlignmentStuck {
        /// Reference-axis index where the walk got stuck.
        i: usize,
        /// Played-axis index where the walk got stuck.
        j: usize,
    },
}

/// Result type for wire-codec operations.
pub type WireResult<T> = Result<T, WireError>;

/// Errors from decoding the length-delimited wire schema (§6).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WireError {
    /// The byte stream ended before a declared field/record was fully read.
    #[error("truncated record: expected {expected} more bytes, found {found}")]
    TruncatedRecord {
        /// Bytes the reader still needed.
        expected: usize,
        /// Bytes actually remaining.
        found: usize,
    },

    /// An `EditOperation` tag was outside `{0, 1, 2}`.
    #[error("invalid EditOperation tag: {tag}")]
    InvalidEnumValue {
        /// The out-of-range tag byte read from the stream.
        tag: u8,
    },

    /// A length-prefixed field (e.g. a repeated list) declared a length
    /// that cannot be satisfied by the remaining bytes.
    #[error("invalid field length: {len} (field {field})")]
    InvalidFieldLength {
        /// The field name being decoded, for diagnostics.
        field: &'static str,
        /// The declared length.
        len: u32,
    },

    /// Underlying I/O failure while reading or writing the stream.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for WireError {
    fn from(err: std::io::Error) -> Self {
        WireError::Io(err.to_string())
    }
}
