//! Note entry and report use-case service.
//!
//! # Responsibility
//! - Write whole notes (language resolution, tag get-or-create, examples)
//!   in one transaction.
//! - Run the filtered report: query, detail loading, empty-result
//!   diagnostics, rendering.
//!
//! # Invariants
//! - An unknown language is only created when the caller set
//!   `NewNote::create_language` (the entry flow's explicit confirmation).
//! - All example inputs are validated before the first row is written.
//! - Diagnostics are computed only for an empty result, in priority order:
//!   language missing, language empty, tags unknown.

use crate::db::DbError;
use crate::model::records::{NewNote, NoteDetail, NoteId, ValidationError};
use crate::repo::language_repo::{LanguageRepository, SqliteLanguageRepository};
use crate::repo::note_repo::{NoteQuery, NoteRepository, SqliteNoteRepository};
use crate::repo::tag_repo::{SqliteTagRepository, TagRepository};
use crate::repo::RepoError;
use crate::report::{render_report, EmptyReportDiagnostic, ReportOptions};
use log::info;
use rusqlite::{Connection, TransactionBehavior};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Named language does not exist and creation was not confirmed.
    LanguageNotFound(String),
    /// Input failed validation before any write.
    Validation(ValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LanguageNotFound(name) => write!(f, "language not found: `{name}`"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for NoteServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<rusqlite::Error> for NoteServiceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(RepoError::Db(DbError::Sqlite(value)))
    }
}

/// Report output: rendered text plus the diagnostic (if any) that explains
/// an empty result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    pub text: String,
    pub matched: usize,
    pub diagnostic: Option<EmptyReportDiagnostic>,
}

impl ReportOutcome {
    /// Full console output: report body, or the diagnostic message.
    pub fn display_text(&self) -> String {
        match &self.diagnostic {
            Some(diagnostic) => format!("{}\n", diagnostic.message()),
            None => self.text.clone(),
        }
    }
}

/// Note service facade over one open connection.
pub struct NoteService<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> NoteService<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }

    /// Writes one note with its tags and examples in a single transaction.
    ///
    /// Validation (note text, tag names, example arity) happens before the
    /// transaction starts, so a bad example never leaves a partial note.
    pub fn add_note(&mut self, new_note: &NewNote) -> Result<NoteDetail, NoteServiceError> {
        if new_note.text.trim().is_empty() {
            return Err(ValidationError::EmptyNoteText.into());
        }
        for example in &new_note.examples {
            example.validate()?;
        }
        let tag_names = dedupe_tags(&new_note.tags);
        // One trimmed name for both lookup and create, so a padded input
        // can never miss the stored row and then trip the UNIQUE constraint.
        let language_name = new_note.language.trim();

        let note_id = {
            let tx = self
                .conn
                .transaction_with_behavior(TransactionBehavior::Immediate)?;

            let note_id = {
                let languages = SqliteLanguageRepository::new(&tx);
                let language = match languages.get_language_by_name(language_name)? {
                    Some(language) => language,
                    None if new_note.create_language => {
                        languages.create_language(language_name)?
                    }
                    None => {
                        return Err(NoteServiceError::LanguageNotFound(
                            language_name.to_string(),
                        ))
                    }
                };

                let notes = SqliteNoteRepository::new(&tx);
                let tags = SqliteTagRepository::new(&tx);
                let note = notes.create_note(&new_note.text, language.id)?;
                for name in &tag_names {
                    let tag = tags.get_or_create_tag(name)?;
                    notes.attach_tag(note.id, tag.id)?;
                }
                for example in &new_note.examples {
                    notes.add_example(note.id, example)?;
                }
                note.id
            };

            tx.commit()?;
            note_id
        };

        info!(
            "event=note_create module=service status=ok note_id={note_id} tags={} examples={}",
            tag_names.len(),
            new_note.examples.len()
        );

        self.note_detail(note_id)?
            .ok_or(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            ))
    }

    /// Exact-match language lookup, for the entry flow's confirmation gate.
    pub fn language_exists(&self, name: &str) -> Result<bool, NoteServiceError> {
        let languages = SqliteLanguageRepository::new(self.conn);
        Ok(languages.get_language_by_name(name)?.is_some())
    }

    /// All known language names, sorted.
    pub fn language_names(&self) -> Result<Vec<String>, NoteServiceError> {
        let languages = SqliteLanguageRepository::new(self.conn);
        Ok(languages
            .list_languages()?
            .into_iter()
            .map(|language| language.name)
            .collect())
    }

    /// Filtered note query with intersection tag semantics.
    pub fn find_notes(&self, filter: &NoteQuery) -> Result<Vec<NoteDetail>, NoteServiceError> {
        let notes = SqliteNoteRepository::new(self.conn);
        let records = notes.find_notes(filter)?;
        let mut details = Vec::with_capacity(records.len());
        for record in records {
            let tags = notes.tags_for_note(record.id)?;
            let examples = notes.examples_for_note(record.id)?;
            details.push(NoteDetail {
                note: record,
                tags,
                examples,
            });
        }
        Ok(details)
    }

    /// One note with tags and examples.
    pub fn note_detail(&self, id: NoteId) -> Result<Option<NoteDetail>, NoteServiceError> {
        let notes = SqliteNoteRepository::new(self.conn);
        let Some(record) = notes.get_note(id)? else {
            return Ok(None);
        };
        let tags = notes.tags_for_note(record.id)?;
        let examples = notes.examples_for_note(record.id)?;
        Ok(Some(NoteDetail {
            note: record,
            tags,
            examples,
        }))
    }

    /// Runs the report: query, render, and (for an empty result) the
    /// highest-priority diagnostic.
    pub fn run_report(
        &self,
        filter: &NoteQuery,
        options: &ReportOptions,
    ) -> Result<ReportOutcome, NoteServiceError> {
        let details = self.find_notes(filter)?;
        let diagnostic = if details.is_empty() && options.diagnostics {
            self.diagnose_empty_result(filter)?
        } else {
            None
        };

        info!(
            "event=report_run module=service status=ok matched={} language={} tags={}",
            details.len(),
            filter.language.as_deref().unwrap_or("-"),
            filter.tags.len()
        );

        Ok(ReportOutcome {
            text: render_report(&details, options),
            matched: details.len(),
            diagnostic,
        })
    }

    fn diagnose_empty_result(
        &self,
        filter: &NoteQuery,
    ) -> Result<Option<EmptyReportDiagnostic>, NoteServiceError> {
        let languages = SqliteLanguageRepository::new(self.conn);
        if let Some(name) = filter.language.as_ref() {
            match languages.get_language_by_name(name)? {
                None => return Ok(Some(EmptyReportDiagnostic::LanguageNotFound)),
                Some(language) => {
                    if languages.note_count(language.id)? == 0 {
                        return Ok(Some(EmptyReportDiagnostic::LanguageHasNoNotes));
                    }
                }
            }
        }

        if !filter.tags.is_empty() {
            let tags = SqliteTagRepository::new(self.conn);
            let existing = tags.existing_tag_names(&filter.tags)?;
            if existing.is_empty() {
                let mut missing: Vec<String> = Vec::new();
                for name in &filter.tags {
                    if !missing.contains(name) {
                        missing.push(name.clone());
                    }
                }
                return Ok(Some(EmptyReportDiagnostic::UnknownTags(missing)));
            }
        }

        Ok(None)
    }
}

/// Trims, drops empties, and deduplicates tag names, preserving first-seen
/// order for attachment.
fn dedupe_tags(tags: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut names = Vec::new();
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            names.push(trimmed.to_string());
        }
    }
    names
}
