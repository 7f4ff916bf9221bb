//! Repository contracts and their SQLite implementations.
//!
//! # Responsibility
//! - Keep all SQL inside the persistence boundary.
//! - Map raw SQLite constraint failures to typed repository errors.
//!
//! # Invariants
//! - Multi-statement mutations run inside one immediate transaction;
//!   every error path rolls the whole unit back.
//! - Constraint violations never leak as raw `rusqlite::Error` values.

use crate::db::DbError;
use crate::model::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod post_repo;
pub mod post_tags;
pub mod tag_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Input failed column-level validation before any SQL ran.
    Validation(ValidationError),
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Referenced row does not exist.
    NotFound { entity: &'static str, id: i64 },
    /// Storage-level uniqueness constraint was violated.
    Conflict {
        entity: &'static str,
        constraint: &'static str,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Conflict { entity, constraint } => {
                write!(f, "{entity} conflict on {constraint}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maps a SQLite uniqueness violation to `Conflict`, anything else to `Db`.
pub(crate) fn map_unique_violation(
    err: rusqlite::Error,
    entity: &'static str,
    constraint: &'static str,
) -> RepoError {
    if is_unique_violation(&err) {
        RepoError::Conflict { entity, constraint }
    } else {
        err.into()
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(code, _)
            if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}
