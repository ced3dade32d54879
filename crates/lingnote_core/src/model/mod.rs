//! Domain model for course notes.
//!
//! # Responsibility
//! - Define the persisted record shapes and the write-side input shapes.
//! - Validate inputs before they reach SQL.
//!
//! # Invariants
//! - Language and tag names are non-empty after trimming.
//! - An example whose original and gloss are both non-empty tokenizes into
//!   the same number of words on each side.

pub mod records;
