//! Language repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide append-only persistence for languages.
//! - Answer the existence/count questions the report diagnostics need.
//!
//! # Invariants
//! - `languages.name` is unique; duplicate creates surface as DB errors.
//! - Name lookups are exact and case-sensitive (SQLite BINARY collation).

use crate::model::records::{validate_name, Language, LanguageId};
use crate::repo::RepoResult;
use rusqlite::{Connection, OptionalExtension};

/// Repository interface for language operations.
pub trait LanguageRepository {
    /// Creates one language. The entry flow must confirm with the user
    /// before calling this for a name it has not seen.
    fn create_language(&self, name: &str) -> RepoResult<Language>;
    /// Exact-match lookup by name.
    fn get_language_by_name(&self, name: &str) -> RepoResult<Option<Language>>;
    /// All languages sorted by name.
    fn list_languages(&self) -> RepoResult<Vec<Language>>;
    /// Number of notes owned by the given language.
    fn note_count(&self, language_id: LanguageId) -> RepoResult<u64>;
}

/// SQLite-backed language repository.
pub struct SqliteLanguageRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLanguageRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl LanguageRepository for SqliteLanguageRepository<'_> {
    fn create_language(&self, name: &str) -> RepoResult<Language> {
        validate_name("language", name)?;

        self.conn
            .execute("INSERT INTO languages (name) VALUES (?1);", [name])?;
        Ok(Language {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    fn get_language_by_name(&self, name: &str) -> RepoResult<Option<Language>> {
        let language = self
            .conn
            .query_row(
                "SELECT id, name FROM languages WHERE name = ?1;",
                [name],
                |row| {
                    Ok(Language {
                        id: row.get("id")?,
                        name: row.get("name")?,
                    })
                },
            )
            .optional()?;
        Ok(language)
    }

    fn list_languages(&self) -> RepoResult<Vec<Language>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM languages ORDER BY name ASC;")?;
        let mut rows = stmt.query([])?;
        let mut languages = Vec::new();
        while let Some(row) = rows.next()? {
            languages.push(Language {
                id: row.get("id")?,
                name: row.get("name")?,
            });
        }
        Ok(languages)
    }

    fn note_count(&self, language_id: LanguageId) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM notes WHERE language_id = ?1;",
            [language_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}
