//! Blog post use-case service.
//!
//! # Responsibility
//! - Implement CreatePost/UpdatePost/DeletePost plus the post read paths.
//!
//! # Invariants
//! - `update_post` replaces title, content and the whole tag set; it is
//!   idempotent for a fixed input.
//! - Unknown tag ids are dropped silently, never errored.
//! - No post mutation ever leaves dangling association rows.

use crate::model::post::{validate_post_fields, BlogPost, PostId};
use crate::model::tag::TagId;
use crate::model::user::UserId;
use crate::repo::post_repo::PostRepository;
use crate::service::{read_back_missing, ServiceError, ServiceResult};
use log::info;

/// Post service facade over a repository implementation.
pub struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one post owned by `user_id` with an initial tag set.
    ///
    /// Fails with [`ServiceError::NotFound`] when the owner is absent and
    /// [`ServiceError::Validation`] on blank title/content.
    pub fn create_post(
        &mut self,
        user_id: UserId,
        title: &str,
        content: &str,
        tag_ids: &[TagId],
    ) -> ServiceResult<BlogPost> {
        validate_post_fields(title, content)?;

        let id = self.repo.create_post(user_id, title, content, tag_ids)?;
        info!("event=post_created module=service post_id={id} user_id={user_id}");
        self.repo
            .get_post(id)?
            .ok_or_else(|| read_back_missing("post"))
    }

    /// Replaces title, content and the full tag set of one post.
    pub fn update_post(
        &mut self,
        id: PostId,
        title: &str,
        content: &str,
        tag_ids: &[TagId],
    ) -> ServiceResult<BlogPost> {
        validate_post_fields(title, content)?;

        self.repo.update_post(id, title, content, tag_ids)?;
        self.repo
            .get_post(id)?
            .ok_or_else(|| read_back_missing("post"))
    }

    /// Deletes one post together with its association rows.
    pub fn delete_post(&mut self, id: PostId) -> ServiceResult<()> {
        self.repo.delete_post(id)?;
        info!("event=post_deleted module=service post_id={id}");
        Ok(())
    }

    /// Gets one post with its resolved tag set.
    pub fn get_post(&self, id: PostId) -> ServiceResult<BlogPost> {
        self.repo
            .get_post(id)?
            .ok_or(ServiceError::NotFound { entity: "post", id })
    }

    /// Lists posts owned by one user, newest first.
    pub fn list_posts_by_user(&self, user_id: UserId) -> ServiceResult<Vec<BlogPost>> {
        Ok(self.repo.list_posts_by_user(user_id)?)
    }
}
