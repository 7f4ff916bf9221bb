//! Blog post domain model.
//!
//! # Invariants
//! - `user_id` always references an existing user; a post never outlives
//!   its owner.
//! - `created_at` is assigned by storage at insert time and never mutated.
//! - `tags` is the fully resolved link set, sorted by tag name.

use crate::model::tag::Tag;
use crate::model::user::UserId;
use crate::model::{check_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Stable integer surrogate key for blog posts.
pub type PostId = i64;

pub const TITLE_MAX_CHARS: usize = 100;

/// Persisted blog post with its resolved tag set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    /// Surrogate key assigned by storage, immutable.
    pub id: PostId,
    /// Owning user.
    pub user_id: UserId,
    pub title: String,
    /// Unbounded body text.
    pub content: String,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
    /// Attached tags, sorted by name.
    pub tags: Vec<Tag>,
}

/// Checks title/content blank and length rules shared by post create and
/// update. Write paths must call this before SQL.
pub fn validate_post_fields(title: &str, content: &str) -> Result<(), ValidationError> {
    check_text("post", "title", title, TITLE_MAX_CHARS)?;
    if content.trim().is_empty() {
        return Err(ValidationError::MissingField {
            entity: "post",
            field: "content",
        });
    }
    Ok(())
}
