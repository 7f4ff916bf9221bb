//! Tag domain model.
//!
//! # Invariants
//! - `name` is globally unique with exact-string (case-sensitive) matching.
//! - Tags persist independently of posts; removing a tag's last post link
//!   never deletes the tag.

use crate::model::{check_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Stable integer surrogate key for tags.
pub type TagId = i64;

pub const TAG_NAME_MAX_CHARS: usize = 50;

/// Persisted tag row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// Trims a requested tag name and checks blank/length rules.
pub fn normalize_tag_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    check_text("tag", "name", trimmed, TAG_NAME_MAX_CHARS)?;
    Ok(trimmed.to_string())
}
