//! Blog post repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide post persistence APIs with their tag-link side effects.
//! - Keep ownership checks (`user_id` must resolve) inside the write
//!   transaction.
//!
//! # Invariants
//! - `update_post` is a full replace of title, content and the tag set.
//! - `delete_post` removes the post's association rows in the same
//!   transaction; no dangling join rows survive.
//! - `created_at` is assigned at insert time and never touched again.

use crate::model::post::{validate_post_fields, BlogPost, PostId};
use crate::model::tag::TagId;
use crate::model::user::UserId;
use crate::repo::post_tags::{load_tags_for_post, replace_post_tags};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};

const POST_SELECT_SQL: &str = "SELECT
    id,
    user_id,
    title,
    content,
    created_at
FROM blog_posts";

/// Repository interface for blog post persistence.
pub trait PostRepository {
    /// Inserts one post with its initial tag set and returns the new id.
    fn create_post(
        &mut self,
        user_id: UserId,
        title: &str,
        content: &str,
        tag_ids: &[TagId],
    ) -> RepoResult<PostId>;
    /// Replaces title, content and the full tag set.
    fn update_post(
        &mut self,
        id: PostId,
        title: &str,
        content: &str,
        tag_ids: &[TagId],
    ) -> RepoResult<()>;
    /// Deletes the post together with its association rows.
    fn delete_post(&mut self, id: PostId) -> RepoResult<()>;
    /// Gets one post with its resolved tag set.
    fn get_post(&self, id: PostId) -> RepoResult<Option<BlogPost>>;
    /// Lists posts owned by one user, newest first.
    fn list_posts_by_user(&self, user_id: UserId) -> RepoResult<Vec<BlogPost>>;
}

/// SQLite-backed blog post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn create_post(
        &mut self,
        user_id: UserId,
        title: &str,
        content: &str,
        tag_ids: &[TagId],
    ) -> RepoResult<PostId> {
        validate_post_fields(title, content)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if !user_exists(&tx, user_id)? {
            return Err(RepoError::NotFound {
                entity: "user",
                id: user_id,
            });
        }

        tx.execute(
            "INSERT INTO blog_posts (user_id, title, content) VALUES (?1, ?2, ?3);",
            params![user_id, title, content],
        )?;
        let post_id = tx.last_insert_rowid();
        replace_post_tags(&tx, post_id, tag_ids)?;

        tx.commit()?;
        Ok(post_id)
    }

    fn update_post(
        &mut self,
        id: PostId,
        title: &str,
        content: &str,
        tag_ids: &[TagId],
    ) -> RepoResult<()> {
        validate_post_fields(title, content)?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let changed = tx.execute(
            "UPDATE blog_posts SET title = ?2, content = ?3 WHERE id = ?1;",
            params![id, title, content],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "post", id });
        }

        replace_post_tags(&tx, id, tag_ids)?;
        tx.commit()?;
        Ok(())
    }

    fn delete_post(&mut self, id: PostId) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute("DELETE FROM post_tags WHERE post_id = ?1;", [id])?;
        let changed = tx.execute("DELETE FROM blog_posts WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "post", id });
        }

        tx.commit()?;
        Ok(())
    }

    fn get_post(&self, id: PostId) -> RepoResult<Option<BlogPost>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            let mut post = parse_post_row(row)?;
            post.tags = load_tags_for_post(self.conn, post.id)?;
            return Ok(Some(post));
        }

        Ok(None)
    }

    fn list_posts_by_user(&self, user_id: UserId) -> RepoResult<Vec<BlogPost>> {
        let mut stmt = self.conn.prepare(&format!(
            "{POST_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY created_at DESC, id ASC;"
        ))?;
        let mut rows = stmt.query([user_id])?;
        let mut posts = Vec::new();

        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }
        for post in &mut posts {
            post.tags = load_tags_for_post(self.conn, post.id)?;
        }

        Ok(posts)
    }
}

fn parse_post_row(row: &Row<'_>) -> RepoResult<BlogPost> {
    Ok(BlogPost {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        created_at: row.get("created_at")?,
        tags: Vec::new(),
    })
}

fn user_exists(tx: &Transaction<'_>, user_id: UserId) -> RepoResult<bool> {
    let exists: i64 = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1);",
        [user_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
