//! Note/example repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide append-only persistence for notes, their tag links, and their
//!   examples.
//! - Own the filtered note query used by the console report.
//!
//! # Invariants
//! - `find_notes` combines multiple tag filters with intersection (AND)
//!   semantics: one `EXISTS` subquery per tag name, so a note must carry
//!   every listed tag and no row is ever duplicated by repeated joins.
//! - Result ordering is ascending note id (creation order).
//! - Filter matching is exact and case-sensitive.

use crate::model::records::{ExampleRecord, NewExample, NoteId, NoteRecord, TagId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const NOTE_SELECT_SQL: &str = "SELECT
    n.id,
    n.text,
    n.language_id,
    l.name AS language
FROM notes n
INNER JOIN languages l ON l.id = n.language_id";

/// Filter criteria for the console report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    /// Exact language name, when given.
    pub language: Option<String>,
    /// Tag names; a matching note must carry every one of them.
    pub tags: Vec<String>,
}

/// Repository interface for note and example operations.
pub trait NoteRepository {
    /// Creates one note under an existing language.
    fn create_note(&self, text: &str, language_id: i64) -> RepoResult<NoteRecord>;
    /// Gets one note by id.
    fn get_note(&self, id: NoteId) -> RepoResult<Option<NoteRecord>>;
    /// Links a tag to a note. Re-attaching an already linked tag is a no-op
    /// thanks to the pair uniqueness constraint.
    fn attach_tag(&self, note_id: NoteId, tag_id: TagId) -> RepoResult<()>;
    /// Appends one example to a note. Validates alignment arity first.
    fn add_example(&self, note_id: NoteId, example: &NewExample) -> RepoResult<ExampleRecord>;
    /// Tag names for one note, alphabetically sorted.
    fn tags_for_note(&self, note_id: NoteId) -> RepoResult<Vec<String>>;
    /// Examples for one note, in insertion order.
    fn examples_for_note(&self, note_id: NoteId) -> RepoResult<Vec<ExampleRecord>>;
    /// Notes matching the filter criteria, ascending by id.
    fn find_notes(&self, query: &NoteQuery) -> RepoResult<Vec<NoteRecord>>;
}

/// SQLite-backed note repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create_note(&self, text: &str, language_id: i64) -> RepoResult<NoteRecord> {
        self.conn.execute(
            "INSERT INTO notes (text, language_id) VALUES (?1, ?2);",
            params![text, language_id],
        )?;

        let id = self.conn.last_insert_rowid();
        self.get_note(id)?.ok_or(RepoError::NotFound {
            entity: "note",
            id,
        })
    }

    fn get_note(&self, id: NoteId) -> RepoResult<Option<NoteRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE n.id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }
        Ok(None)
    }

    fn attach_tag(&self, note_id: NoteId, tag_id: TagId) -> RepoResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO note_tags (tag_id, note_id) VALUES (?1, ?2);",
            params![tag_id, note_id],
        )?;
        Ok(())
    }

    fn add_example(&self, note_id: NoteId, example: &NewExample) -> RepoResult<ExampleRecord> {
        example.validate()?;

        self.conn.execute(
            "INSERT INTO examples (original, gloss, translation, note_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                example.original.as_str(),
                example.gloss.as_str(),
                example.translation.as_str(),
                note_id,
            ],
        )?;

        Ok(ExampleRecord {
            id: self.conn.last_insert_rowid(),
            original: example.original.clone(),
            gloss: example.gloss.clone(),
            translation: example.translation.clone(),
            note_id,
        })
    }

    fn tags_for_note(&self, note_id: NoteId) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT t.name
             FROM note_tags nt
             INNER JOIN tags t ON t.id = nt.tag_id
             WHERE nt.note_id = ?1
             ORDER BY t.name ASC;",
        )?;
        let mut rows = stmt.query([note_id])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(row.get(0)?);
        }
        Ok(tags)
    }

    fn examples_for_note(&self, note_id: NoteId) -> RepoResult<Vec<ExampleRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, original, gloss, translation, note_id
             FROM examples
             WHERE note_id = ?1
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([note_id])?;
        let mut examples = Vec::new();
        while let Some(row) = rows.next()? {
            examples.push(ExampleRecord {
                id: row.get("id")?,
                original: row.get("original")?,
                gloss: row.get("gloss")?,
                translation: row.get("translation")?,
                note_id: row.get("note_id")?,
            });
        }
        Ok(examples)
    }

    fn find_notes(&self, query: &NoteQuery) -> RepoResult<Vec<NoteRecord>> {
        let mut sql = format!("{NOTE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(language) = query.language.as_ref() {
            sql.push_str(" AND l.name = ?");
            bind_values.push(Value::Text(language.clone()));
        }

        for tag in &query.tags {
            sql.push_str(
                " AND EXISTS (
                    SELECT 1
                    FROM note_tags nt
                    INNER JOIN tags t ON t.id = nt.tag_id
                    WHERE nt.note_id = n.id
                      AND t.name = ?
                )",
            );
            bind_values.push(Value::Text(tag.clone()));
        }

        sql.push_str(" ORDER BY n.id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }
}

fn parse_note_row(row: &Row<'_>) -> RepoResult<NoteRecord> {
    Ok(NoteRecord {
        id: row.get("id")?,
        text: row.get("text")?,
        language_id: row.get("language_id")?,
        language: row.get("language")?,
    })
}
