//! Tag use-case service.
//!
//! # Invariants
//! - Names are trimmed before persistence; blank names are rejected.
//! - Duplicate detection is exact-string: differently cased names are
//!   distinct tags.

use crate::model::tag::{normalize_tag_name, Tag};
use crate::repo::tag_repo::TagRepository;
use crate::service::{read_back_missing, ServiceResult};

/// Tag service facade over a repository implementation.
pub struct TagService<R: TagRepository> {
    repo: R,
}

impl<R: TagRepository> TagService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one tag from a raw name, trimming surrounding whitespace.
    ///
    /// Fails with [`crate::service::ServiceError::Conflict`] when the
    /// exact name already exists.
    pub fn create_tag(&mut self, name: &str) -> ServiceResult<Tag> {
        let name = normalize_tag_name(name)?;

        let id = self.repo.create_tag(&name)?;
        self.repo
            .get_tag(id)?
            .ok_or_else(|| read_back_missing("tag"))
    }

    /// Lists all tags sorted by name, for selection controls.
    pub fn list_tags(&self) -> ServiceResult<Vec<Tag>> {
        Ok(self.repo.list_tags()?)
    }
}
