//! Terminal text layout.
//!
//! # Responsibility
//! - Lay out parallel original/gloss word sequences in aligned columns.
//! - Provide the word-wrap and whitespace helpers the report renderer uses.
//!
//! # Invariants
//! - Widths are measured in chars, not bytes; glosses are rarely ASCII.

pub mod align;
