//! Mutation-protocol services over the repository contracts.
//!
//! # Responsibility
//! - Normalize and validate string-typed caller input.
//! - Translate repository failures into the boundary error taxonomy.
//!
//! # Invariants
//! - Every failure is a returned `ServiceError`; the core never panics or
//!   terminates the caller's runtime.
//! - The store is unchanged on any error (repositories roll back).

use crate::model::ValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod post_service;
pub mod tag_service;
pub mod user_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Boundary error taxonomy consumed by the request-handling layer.
#[derive(Debug)]
pub enum ServiceError {
    /// Malformed or missing input; the caller should re-prompt.
    Validation(ValidationError),
    /// Referenced id is absent; the caller shows a not-found response.
    NotFound { entity: &'static str, id: i64 },
    /// Uniqueness violation; the caller shows a friendly duplicate message.
    Conflict {
        entity: &'static str,
        constraint: &'static str,
    },
    /// Storage-layer failure after rollback; the caller shows a retry
    /// message.
    Persistence(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Conflict { entity, constraint } => {
                write!(f, "{entity} already exists for {constraint}")
            }
            Self::Persistence(err) => write!(f, "storage failure: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::Conflict { entity, constraint } => Self::Conflict { entity, constraint },
            other => Self::Persistence(other),
        }
    }
}

/// Error for a row that vanished between a committed write and its
/// read-back. Indicates a concurrent delete or storage corruption.
pub(crate) fn read_back_missing(entity: &'static str) -> ServiceError {
    ServiceError::Persistence(RepoError::InvalidData(format!(
        "{entity} missing on read-back after commit"
    )))
}
