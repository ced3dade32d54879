//! Tag repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide get-or-create persistence for tags.
//! - Answer which of a set of tag names exist, for report diagnostics.
//!
//! # Invariants
//! - `tags.name` is unique; get-or-create is an atomic find-else-insert
//!   against that constraint (`INSERT OR IGNORE` then select), never a
//!   check-then-insert pair.
//! - Name lookups are exact and case-sensitive.

use crate::model::records::{validate_name, Tag};
use crate::repo::{RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension};

/// Repository interface for tag operations.
pub trait TagRepository {
    /// Returns the tag with the given name, creating it if absent. Never
    /// duplicates: a second call with the same name returns the same row.
    fn get_or_create_tag(&self, name: &str) -> RepoResult<Tag>;
    /// Exact-match lookup by name.
    fn get_tag_by_name(&self, name: &str) -> RepoResult<Option<Tag>>;
    /// All tags sorted by name.
    fn list_tags(&self) -> RepoResult<Vec<Tag>>;
    /// The subset of `names` that exist in the store.
    fn existing_tag_names(&self, names: &[String]) -> RepoResult<Vec<String>>;
}

/// SQLite-backed tag repository.
pub struct SqliteTagRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTagRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TagRepository for SqliteTagRepository<'_> {
    fn get_or_create_tag(&self, name: &str) -> RepoResult<Tag> {
        validate_name("tag", name)?;

        self.conn
            .execute("INSERT OR IGNORE INTO tags (name) VALUES (?1);", [name])?;
        self.get_tag_by_name(name)?.ok_or_else(|| {
            RepoError::InvalidData(format!("tag `{name}` missing after INSERT OR IGNORE"))
        })
    }

    fn get_tag_by_name(&self, name: &str) -> RepoResult<Option<Tag>> {
        let tag = self
            .conn
            .query_row("SELECT id, name FROM tags WHERE name = ?1;", [name], |row| {
                Ok(Tag {
                    id: row.get("id")?,
                    name: row.get("name")?,
                })
            })
            .optional()?;
        Ok(tag)
    }

    fn list_tags(&self) -> RepoResult<Vec<Tag>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM tags ORDER BY name ASC;")?;
        let mut rows = stmt.query([])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            tags.push(Tag {
                id: row.get("id")?,
                name: row.get("name")?,
            });
        }
        Ok(tags)
    }

    fn existing_tag_names(&self, names: &[String]) -> RepoResult<Vec<String>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; names.len()].join(", ");
        let sql = format!("SELECT name FROM tags WHERE name IN ({placeholders}) ORDER BY name ASC;");
        let bind_values: Vec<Value> = names
            .iter()
            .map(|name| Value::Text(name.clone()))
            .collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut found = Vec::new();
        while let Some(row) = rows.next()? {
            found.push(row.get("name")?);
        }
        Ok(found)
    }
}
