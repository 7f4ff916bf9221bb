//! Tag repository contract and SQLite implementation.
//!
//! # Invariants
//! - Tag names are unique with exact-string matching; a duplicate insert
//!   surfaces as `RepoError::Conflict`.
//! - Tags are never deleted as a side effect of post edits.

use crate::model::tag::{Tag, TagId};
use crate::repo::{map_unique_violation, RepoResult};
use rusqlite::Connection;

/// Repository interface for tag persistence.
pub trait TagRepository {
    /// Inserts one tag and returns its assigned id.
    fn create_tag(&mut self, name: &str) -> RepoResult<TagId>;
    /// Gets one tag by id.
    fn get_tag(&self, id: TagId) -> RepoResult<Option<Tag>>;
    /// Lists all tags sorted by name.
    fn list_tags(&self) -> RepoResult<Vec<Tag>>;
}

/// SQLite-backed tag repository.
pub struct SqliteTagRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteTagRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl TagRepository for SqliteTagRepository<'_> {
    fn create_tag(&mut self, name: &str) -> RepoResult<TagId> {
        self.conn
            .execute("INSERT INTO tags (name) VALUES (?1);", [name])
            .map_err(|err| map_unique_violation(err, "tag", "name"))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_tag(&self, id: TagId) -> RepoResult<Option<Tag>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM tags WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(Tag {
                id: row.get("id")?,
                name: row.get("name")?,
            }));
        }
        Ok(None)
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
}
