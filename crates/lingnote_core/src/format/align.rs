//! Column alignment for paired original/gloss word sequences.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Gutter between aligned columns, in spaces.
const COLUMN_GUTTER: usize = 2;

/// Alignment failure: the two word sequences have different lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignError {
    ArityMismatch { original: usize, gloss: usize },
}

impl Display for AlignError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ArityMismatch { original, gloss } => write!(
                f,
                "cannot align {original} original word(s) with {gloss} gloss word(s)"
            ),
        }
    }
}

impl Error for AlignError {}

/// Lays out two equal-length word sequences into column-aligned line pairs.
///
/// Word pairs are packed greedily: each column is as wide as the wider of
/// its two words plus a two-space gutter, and a pair that would not fit in
/// the remaining width starts a new line pair. A single word wider than
/// `width` still gets placed (overflowing visually) rather than truncated.
/// Both rows of a pair are padded to the same total length.
///
/// Empty inputs produce a single empty line pair.
pub fn align_paired_words(
    width: usize,
    words1: &[&str],
    words2: &[&str],
) -> Result<Vec<(String, String)>, AlignError> {
    if words1.len() != words2.len() {
        return Err(AlignError::ArityMismatch {
            original: words1.len(),
            gloss: words2.len(),
        });
    }

    let mut rows = Vec::new();
    let mut line1 = String::new();
    let mut line2 = String::new();
    let mut remaining = width;

    for (word1, word2) in words1.iter().zip(words2.iter()) {
        let column = char_len(word1).max(char_len(word2)) + COLUMN_GUTTER;
        if column > remaining && !line1.is_empty() {
            push_row(&mut rows, &mut line1, &mut line2);
            remaining = width;
        }

        pad_to(&mut line1, word1, column);
        pad_to(&mut line2, word2, column);
        remaining = remaining.saturating_sub(column);
    }

    push_row(&mut rows, &mut line1, &mut line2);
    Ok(rows)
}

/// Greedy word wrap to `width` chars per line. A single word longer than
/// `width` occupies its own line untruncated. Empty input yields no lines.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        if char_len(&current) + 1 + char_len(word) > width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current.push(' ');
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Collapses internal whitespace runs to single spaces and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

fn push_row(rows: &mut Vec<(String, String)>, line1: &mut String, line2: &mut String) {
    rows.push((std::mem::take(line1), std::mem::take(line2)));
}

fn pad_to(line: &mut String, word: &str, column: usize) {
    line.push_str(word);
    for _ in char_len(word)..column {
        line.push(' ');
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
