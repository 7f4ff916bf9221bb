//! Domain model for the Blogly core.
//!
//! # Responsibility
//! - Define the canonical entity structs used by repositories and services.
//! - Own column-level validation rules shared by all write paths.
//!
//! # Invariants
//! - Every entity is identified by an integer surrogate key assigned by
//!   storage and never reused.
//! - A `BlogPost` always belongs to exactly one `User`.
//! - The Post<->Tag link carries no data beyond the `(post_id, tag_id)` pair.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod post;
pub mod tag;
pub mod user;

/// Field-level validation failure, recoverable by the caller re-prompting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is missing or blank after trimming.
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    /// Field exceeds its column length cap.
    TooLong {
        entity: &'static str,
        field: &'static str,
        max_chars: usize,
    },
    /// Value could not be parsed as a calendar date.
    InvalidDate { field: &'static str, value: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { entity, field } => {
                write!(f, "{entity}.{field} is required and must not be blank")
            }
            Self::TooLong {
                entity,
                field,
                max_chars,
            } => write!(f, "{entity}.{field} exceeds {max_chars} characters"),
            Self::InvalidDate { field, value } => {
                write!(f, "{field} is not a valid calendar date: `{value}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// Checks one required text field against blank/length rules.
pub(crate) fn check_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { entity, field });
    }
    if value.chars().count() > max_chars {
        return Err(ValidationError::TooLong {
            entity,
            field,
            max_chars,
        });
    }
    Ok(())
}
