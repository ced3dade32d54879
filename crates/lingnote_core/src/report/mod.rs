//! Console report rendering.
//!
//! # Responsibility
//! - Turn a query result into human-readable note blocks.
//! - Emit the empty-result diagnostic chosen by the service layer.
//!
//! # Invariants
//! - Per-note layout: blank line, `Note {id}: {language}` header, sorted
//!   tag list, blank line, indented body, then examples.
//! - Aligned example blocks render at `width - 4`; the note body wraps at
//!   `width - 2`.
//! - A translation is separated by an extra blank line only when its
//!   aligned block spans more than one line pair.

use crate::format::align::{align_paired_words, normalize_whitespace, wrap_words};
use crate::model::records::{ExampleRecord, NoteDetail};

const BODY_INDENT: &str = "  ";
const EXAMPLE_INDENT: &str = "    ";
const TAGS_LABEL: &str = "  Tags: ";

/// Rendering options; every toggle is independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub show_tags: bool,
    pub show_examples: bool,
    /// Cap on examples shown per note. `None` means unlimited.
    pub max_examples: Option<usize>,
    /// Terminal width used for wrapping.
    pub width: usize,
    /// Whether to emit an empty-result diagnostic.
    pub diagnostics: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            show_tags: true,
            show_examples: true,
            max_examples: None,
            width: 100,
            diagnostics: true,
        }
    }
}

/// Why an empty result came back empty. Variants are mutually exclusive and
/// chosen in this priority order by the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReportDiagnostic {
    LanguageNotFound,
    LanguageHasNoNotes,
    /// None of the named tag filters exist; carries the missing names.
    UnknownTags(Vec<String>),
}

impl EmptyReportDiagnostic {
    pub fn message(&self) -> String {
        match self {
            Self::LanguageNotFound => "Language not found".to_string(),
            Self::LanguageHasNoNotes => "No notes associated with this language".to_string(),
            Self::UnknownTags(names) => format!("No such tag(s): {}", names.join(", ")),
        }
    }
}

/// Renders the full report for a set of note details.
pub fn render_report(details: &[NoteDetail], options: &ReportOptions) -> String {
    let mut lines: Vec<String> = Vec::new();
    for detail in details {
        render_note(&mut lines, detail, options);
    }
    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn render_note(lines: &mut Vec<String>, detail: &NoteDetail, options: &ReportOptions) {
    lines.push(String::new());
    lines.push(format!("Note {}: {}", detail.note.id, detail.note.language));

    if options.show_tags && !detail.tags.is_empty() {
        render_tags(lines, &detail.tags, options.width);
    }

    lines.push(String::new());
    let body_width = options.width.saturating_sub(BODY_INDENT.len()).max(1);
    for line in wrap_words(&detail.note.text, body_width) {
        lines.push(format!("{BODY_INDENT}{line}"));
    }

    if options.show_examples {
        let cap = match options.max_examples {
            Some(0) | None => detail.examples.len(),
            Some(cap) => cap,
        };
        for example in detail.examples.iter().take(cap) {
            render_example(lines, example, options.width);
        }
    }
}

/// Sorted tag list; continuation lines align under the first tag name.
fn render_tags(lines: &mut Vec<String>, tags: &[String], width: usize) {
    let mut sorted: Vec<&str> = tags.iter().map(String::as_str).collect();
    sorted.sort_unstable();

    let list_width = width.saturating_sub(TAGS_LABEL.len()).max(1);
    let wrapped = wrap_words(&sorted.join(", "), list_width);
    let continuation = " ".repeat(TAGS_LABEL.len());
    for (index, line) in wrapped.iter().enumerate() {
        if index == 0 {
            lines.push(format!("{TAGS_LABEL}{line}"));
        } else {
            lines.push(format!("{continuation}{line}"));
        }
    }
}

fn render_example(lines: &mut Vec<String>, example: &ExampleRecord, width: usize) {
    lines.push(String::new());
    let example_width = width.saturating_sub(EXAMPLE_INDENT.len()).max(1);

    let original_words: Vec<&str> = example.original.split_whitespace().collect();
    let gloss_words: Vec<&str> = example.gloss.split_whitespace().collect();

    let mut aligned_rows = 0;
    if !original_words.is_empty() && !gloss_words.is_empty() {
        match align_paired_words(example_width, &original_words, &gloss_words) {
            Ok(rows) => {
                aligned_rows = rows.len();
                for (line1, line2) in rows {
                    lines.push(format!("{EXAMPLE_INDENT}{line1}"));
                    lines.push(format!("{EXAMPLE_INDENT}{line2}"));
                }
            }
            // Rows written before arity validation existed: show the
            // original alone rather than failing the whole report.
            Err(_) => render_single_field(lines, &example.original, example_width),
        }
    } else if !original_words.is_empty() {
        render_single_field(lines, &example.original, example_width);
    } else if !gloss_words.is_empty() {
        render_single_field(lines, &example.gloss, example_width);
    }

    if !example.translation.trim().is_empty() {
        if aligned_rows > 1 {
            lines.push(String::new());
        }
        for line in wrap_words(&example.translation, example_width) {
            lines.push(format!("{EXAMPLE_INDENT}{line}"));
        }
    }
}

fn render_single_field(lines: &mut Vec<String>, field: &str, width: usize) {
    for line in wrap_words(&normalize_whitespace(field), width) {
        lines.push(format!("{EXAMPLE_INDENT}{line}"));
    }
}
