//! Persisted records and write-side inputs.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type LanguageId = i64;
pub type NoteId = i64;
pub type TagId = i64;
pub type ExampleId = i64;

/// A language studied in the course. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: LanguageId,
    pub name: String,
}

/// A cross-linguistic feature label. Append-only, unique by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// One recorded observation about a language feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: NoteId,
    pub text: String,
    pub language_id: LanguageId,
    /// Owning language name, joined in on read.
    pub language: String,
}

/// An illustrative utterance attached to one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleRecord {
    pub id: ExampleId,
    pub original: String,
    pub gloss: String,
    pub translation: String,
    pub note_id: NoteId,
}

/// Read model for report rendering: one note with its tags and examples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDetail {
    pub note: NoteRecord,
    /// Alphabetically sorted.
    pub tags: Vec<String>,
    /// Insertion order.
    pub examples: Vec<ExampleRecord>,
}

/// Example input for the entry flow, validated before any write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewExample {
    pub original: String,
    pub gloss: String,
    pub translation: String,
}

impl NewExample {
    /// Checks the word-alignment precondition: when both the original and
    /// the gloss are non-empty, their whitespace token counts must match.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let original_words = self.original.split_whitespace().count();
        let gloss_words = self.gloss.split_whitespace().count();
        if original_words > 0 && gloss_words > 0 && original_words != gloss_words {
            return Err(ValidationError::ArityMismatch {
                original: original_words,
                gloss: gloss_words,
            });
        }
        Ok(())
    }
}

/// Note input for the entry flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNote {
    pub language: String,
    /// Explicit confirmation gate: an unknown language is only created when
    /// the caller set this after asking the user.
    pub create_language: bool,
    pub text: String,
    pub tags: Vec<String>,
    pub examples: Vec<NewExample>,
}

/// Input validation failure for the write path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName(&'static str),
    EmptyNoteText,
    ArityMismatch { original: usize, gloss: usize },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName(entity) => write!(f, "{entity} name must not be empty"),
            Self::EmptyNoteText => write!(f, "note text must not be empty"),
            Self::ArityMismatch { original, gloss } => write!(
                f,
                "example original has {original} word(s) but gloss has {gloss}"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Rejects empty (after trimming) language/tag names.
pub fn validate_name(entity: &'static str, name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName(entity));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{NewExample, ValidationError};

    #[test]
    fn example_with_matching_word_counts_is_valid() {
        let example = NewExample {
            original: "ka hale nui".to_string(),
            gloss: "DET house big".to_string(),
            translation: "the big house".to_string(),
        };
        assert!(example.validate().is_ok());
    }

    #[test]
    fn example_with_mismatched_word_counts_is_rejected() {
        let example = NewExample {
            original: "ka hale".to_string(),
            gloss: "DET house big".to_string(),
            translation: String::new(),
        };
        let err = example.validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::ArityMismatch {
                original: 2,
                gloss: 3
            }
        );
    }

    #[test]
    fn example_with_empty_gloss_skips_arity_check() {
        let example = NewExample {
            original: "ka hale".to_string(),
            gloss: "   ".to_string(),
            translation: "the house".to_string(),
        };
        assert!(example.validate().is_ok());
    }
}
