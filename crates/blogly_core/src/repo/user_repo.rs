//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide user persistence APIs, including the partial-update path.
//! - Own the delete-user cascade over posts and their tag links.
//!
//! # Invariants
//! - Write paths validate input before SQL mutations.
//! - `delete_user` removes the user's posts and all their association
//!   rows in one transaction; no orphaned posts or links survive.

use crate::model::user::{NewUser, User, UserId, UserPatch};
use crate::repo::{map_unique_violation, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};

const USER_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    birthdate,
    image_url
FROM users";

const USER_NAME_CONSTRAINT: &str = "first_name, last_name";

/// Repository interface for user persistence.
pub trait UserRepository {
    /// Inserts one user and returns its assigned id.
    fn create_user(&mut self, user: &NewUser) -> RepoResult<UserId>;
    /// Applies only the present fields of the patch.
    fn update_user(&mut self, id: UserId, patch: &UserPatch) -> RepoResult<()>;
    /// Deletes the user and cascades over their posts and tag links.
    fn delete_user(&mut self, id: UserId) -> RepoResult<()>;
    /// Gets one user by id.
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    /// Lists all users in stable id order.
    fn list_users(&self) -> RepoResult<Vec<User>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&mut self, user: &NewUser) -> RepoResult<UserId> {
        user.validate()?;

        self.conn
            .execute(
                "INSERT INTO users (first_name, last_name, birthdate, image_url)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    user.first_name.as_str(),
                    user.last_name.as_str(),
                    user.birthdate,
                    user.image_url.as_deref(),
                ],
            )
            .map_err(|err| map_unique_violation(err, "user", USER_NAME_CONSTRAINT))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_user(&mut self, id: UserId, patch: &UserPatch) -> RepoResult<()> {
        patch.validate()?;
        if patch.is_empty() {
            // Nothing to apply; still report a missing target.
            if self.get_user(id)?.is_none() {
                return Err(RepoError::NotFound { entity: "user", id });
            }
            return Ok(());
        }

        let mut assignments: Vec<&str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(value) = &patch.first_name {
            assignments.push("first_name = ?");
            bind_values.push(Value::Text(value.clone()));
        }
        if let Some(value) = &patch.last_name {
            assignments.push("last_name = ?");
            bind_values.push(Value::Text(value.clone()));
        }
        if let Some(value) = &patch.birthdate {
            assignments.push("birthdate = ?");
            bind_values.push(Value::Text(value.format("%Y-%m-%d").to_string()));
        }
        if let Some(value) = &patch.image_url {
            assignments.push("image_url = ?");
            bind_values.push(Value::Text(value.clone()));
        }

        let sql = format!("UPDATE users SET {} WHERE id = ?;", assignments.join(", "));
        bind_values.push(Value::Integer(id));

        let changed = self
            .conn
            .execute(&sql, params_from_iter(bind_values))
            .map_err(|err| map_unique_violation(err, "user", USER_NAME_CONSTRAINT))?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "user", id });
        }

        Ok(())
    }

    fn delete_user(&mut self, id: UserId) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "DELETE FROM post_tags
             WHERE post_id IN (SELECT id FROM blog_posts WHERE user_id = ?1);",
            [id],
        )?;
        tx.execute("DELETE FROM blog_posts WHERE user_id = ?1;", [id])?;
        let changed = tx.execute("DELETE FROM users WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "user", id });
        }

        tx.commit()?;
        Ok(())
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();

        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        Ok(users)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    Ok(User {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        birthdate: row.get("birthdate")?,
        image_url: row.get("image_url")?,
    })
}
