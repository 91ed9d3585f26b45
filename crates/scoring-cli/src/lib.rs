//! scoring-cli library.
//!
//! Provides the command implementations backing the `scoring-cli` binary,
//! split out from `main.rs` so each subcommand's logic is independently
//! testable and reusable.

pub mod commands;
